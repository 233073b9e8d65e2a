use super::{keys, Hooks};
use crate::api::types::{ApiResponse, ContactUs, JobApplication, Page, Single, Student, StudentLead};
use crate::query::QueryDef;

impl Hooks {
  pub fn students(&self, page: u32, limit: u32) -> QueryDef<ApiResponse<Page<Student>>> {
    self.query(
      keys::students(page, limit),
      self.options().keep_previous_data(),
      move |api| async move { api.fetch_students(page, limit).await },
    )
  }

  pub fn student(&self, student_id: &str) -> QueryDef<ApiResponse<Single<Student>>> {
    let id = student_id.to_string();
    let options = self.options().keep_previous_data().enabled(!student_id.is_empty());
    self.query(keys::student(student_id), options, move |api| {
      let id = id.clone();
      async move { api.fetch_student(&id).await }
    })
  }

  pub fn student_leads(&self, page: u32, limit: u32) -> QueryDef<ApiResponse<Page<StudentLead>>> {
    self.query(
      keys::student_leads(page, limit),
      self.options().keep_previous_data(),
      move |api| async move { api.fetch_student_leads(page, limit).await },
    )
  }

  pub fn job_applications(&self, page: u32, limit: u32) -> QueryDef<ApiResponse<Page<JobApplication>>> {
    self.query(
      keys::job_applicants(page, limit),
      self.options().keep_previous_data(),
      move |api| async move { api.fetch_job_applications(page, limit).await },
    )
  }

  pub fn subscribers(&self, page: u32, limit: u32) -> QueryDef<ApiResponse<Page<ContactUs>>> {
    self.query(
      keys::contact_us(page, limit),
      self.options().keep_previous_data(),
      move |api| async move { api.fetch_subscribers(page, limit).await },
    )
  }
}
