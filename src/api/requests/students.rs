use crate::api::types::{ApiResponse, ContactUs, JobApplication, Page, Single, Student, StudentLead};
use crate::api::{check_page, Api, ApiError, QueryParams, RequestOptions};

const STUDENTS: &str = "/api/students";
const LEADS: &str = "/api/students/leads";
const CAREERS: &str = "/api/careers";
const CONTACT_US: &str = "/api/contactus";

impl Api {
  async fn fetch_page<T: serde::de::DeserializeOwned>(
    &self,
    base: &str,
    page: u32,
    limit: u32,
  ) -> Result<ApiResponse<Page<T>>, ApiError> {
    let path = QueryParams::new()
      .add("page", page)
      .add("limit", limit)
      .apply(base);
    let response: ApiResponse<Page<T>> = self.http().get(&path, RequestOptions::new()).await?;
    check_page(&path, &response.data);
    Ok(response)
  }

  pub async fn fetch_students(&self, page: u32, limit: u32) -> Result<ApiResponse<Page<Student>>, ApiError> {
    self.fetch_page(STUDENTS, page, limit).await
  }

  pub async fn fetch_student(&self, student_id: &str) -> Result<ApiResponse<Single<Student>>, ApiError> {
    let path = format!("{}/{}", STUDENTS, student_id);
    self.http().get(&path, RequestOptions::new()).await
  }

  pub async fn fetch_student_leads(&self, page: u32, limit: u32) -> Result<ApiResponse<Page<StudentLead>>, ApiError> {
    self.fetch_page(LEADS, page, limit).await
  }

  pub async fn fetch_job_applications(
    &self,
    page: u32,
    limit: u32,
  ) -> Result<ApiResponse<Page<JobApplication>>, ApiError> {
    self.fetch_page(CAREERS, page, limit).await
  }

  pub async fn fetch_subscribers(&self, page: u32, limit: u32) -> Result<ApiResponse<Page<ContactUs>>, ApiError> {
    self.fetch_page(CONTACT_US, page, limit).await
  }
}

#[cfg(test)]
mod tests {
  use crate::api::requests::test_support::{api, page};
  use serde_json::json;
  use wiremock::matchers::{method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  #[tokio::test]
  async fn test_student_lists() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/api/students"))
      .and(query_param("page", "1"))
      .respond_with(ResponseTemplate::new(200).set_body_json(page(
        "students",
        json!([{ "_id": "s1", "firstName": "Asha", "lastName": "Rao", "gender": "FEMALE" }]),
      )))
      .mount(&server)
      .await;
    Mock::given(method("GET"))
      .and(path("/api/students/leads"))
      .respond_with(ResponseTemplate::new(200).set_body_json(page(
        "students",
        json!([{ "fullName": "Kiran", "city": "Pune" }]),
      )))
      .mount(&server)
      .await;
    Mock::given(method("GET"))
      .and(path("/api/careers"))
      .respond_with(ResponseTemplate::new(200).set_body_json(page(
        "jobApplicants",
        json!([{ "_id": "j1", "name": "Dev", "email": "dev@example.com", "role": "Backend" }]),
      )))
      .mount(&server)
      .await;
    Mock::given(method("GET"))
      .and(path("/api/contactus"))
      .respond_with(ResponseTemplate::new(200).set_body_json(page(
        "contactus",
        json!([{ "_id": "c1", "email": "hi@example.com" }]),
      )))
      .mount(&server)
      .await;

    let api = api(&server);
    let students = api.fetch_students(1, 10).await.unwrap();
    assert_eq!(students.data.items[0].name().as_deref(), Some("Asha Rao"));
    let leads = api.fetch_student_leads(1, 10).await.unwrap();
    assert_eq!(leads.data.items[0].city.as_deref(), Some("Pune"));
    let careers = api.fetch_job_applications(1, 10).await.unwrap();
    assert_eq!(careers.data.items[0].role, "Backend");
    let subscribers = api.fetch_subscribers(1, 10).await.unwrap();
    assert_eq!(subscribers.data.items[0].email, "hi@example.com");
  }

  #[tokio::test]
  async fn test_inconsistent_page_is_still_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/api/students"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "data": {
          "students": [{ "_id": "s1" }, { "_id": "s2" }],
          "pagination": { "page": 1, "limit": 1, "totalPages": 2, "totalDocs": 2 }
        }
      })))
      .mount(&server)
      .await;

    let students = api(&server).fetch_students(1, 1).await.unwrap();
    assert_eq!(students.data.items.len(), 2);
    assert!(!students.data.is_consistent());
  }
}
