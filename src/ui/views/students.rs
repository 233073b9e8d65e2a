use ratatui::prelude::*;

use super::kys::KysView;
use super::paged::Listing;
use crate::api::types::{ApiResponse, ContactUs, JobApplication, Page, PageInfo, Paginator, Student, StudentLead};
use crate::hooks::Hooks;
use crate::query::QueryDef;
use crate::ui::renderfns::{cell, flag};
use crate::ui::view::View;

/// Registered students. Enter opens their KYS review.
pub struct StudentListing;

impl Listing for StudentListing {
  type Data = ApiResponse<Page<Student>>;
  type Item = Student;

  fn title(&self) -> String {
    "Students".to_string()
  }

  fn query(&self, hooks: &Hooks, page: u32, limit: u32, _search: Option<&str>) -> QueryDef<Self::Data> {
    hooks.students(page, limit)
  }

  fn items<'a>(&self, data: &'a Self::Data) -> &'a [Student] {
    &data.data.items
  }

  fn page_info(&self, data: &Self::Data) -> PageInfo {
    data.data.info()
  }

  fn row(&self, s: &Student) -> Line<'static> {
    let institution = s.institution.as_ref().map(|i| i.name.clone()).unwrap_or_default();
    Line::from(vec![
      Span::styled(
        cell(s.sconto_id.as_deref().unwrap_or("-"), 12),
        Style::default().fg(Color::Cyan),
      ),
      Span::raw(" "),
      Span::raw(cell(&self.name(s), 24)),
      Span::raw(" "),
      Span::raw(cell(s.email.as_deref().unwrap_or_default(), 28)),
      Span::raw(" "),
      flag("verified", s.is_verified),
      Span::styled(cell(&institution, 30), Style::default().fg(Color::DarkGray)),
    ])
  }

  fn id(&self, s: &Student) -> String {
    s.id.clone()
  }

  fn name(&self, s: &Student) -> String {
    s.name().unwrap_or_else(|| "(unnamed)".to_string())
  }

  fn open(&self, hooks: &Hooks, s: &Student) -> Option<Box<dyn View>> {
    Some(Box::new(KysView::new(&s.id, &self.name(s), hooks.clone())))
  }
}

/// Students who left their details before registering.
pub struct LeadListing;

impl Listing for LeadListing {
  type Data = ApiResponse<Page<StudentLead>>;
  type Item = StudentLead;

  fn title(&self) -> String {
    "Leads".to_string()
  }

  fn query(&self, hooks: &Hooks, page: u32, limit: u32, _search: Option<&str>) -> QueryDef<Self::Data> {
    hooks.student_leads(page, limit)
  }

  fn items<'a>(&self, data: &'a Self::Data) -> &'a [StudentLead] {
    &data.data.items
  }

  fn page_info(&self, data: &Self::Data) -> PageInfo {
    data.data.info()
  }

  fn row(&self, l: &StudentLead) -> Line<'static> {
    let place = [l.city.as_deref(), l.state.as_deref()]
      .into_iter()
      .flatten()
      .collect::<Vec<_>>()
      .join(", ");
    Line::from(vec![
      Span::raw(cell(&self.name(l), 24)),
      Span::raw(" "),
      Span::raw(cell(l.email.as_deref().unwrap_or_default(), 28)),
      Span::raw(" "),
      Span::raw(cell(
        &l.contact_number.as_ref().and_then(|c| c.display()).unwrap_or_default(),
        16,
      )),
      Span::raw(" "),
      Span::styled(cell(l.institution.as_deref().unwrap_or_default(), 24), Style::default().fg(Color::DarkGray)),
      Span::styled(place, Style::default().fg(Color::DarkGray)),
    ])
  }

  fn id(&self, l: &StudentLead) -> String {
    l.id.clone().unwrap_or_default()
  }

  fn name(&self, l: &StudentLead) -> String {
    l.full_name.clone().unwrap_or_else(|| "(unnamed)".to_string())
  }
}

/// Job applications from the careers page.
pub struct CareerListing;

impl Listing for CareerListing {
  type Data = ApiResponse<Page<JobApplication>>;
  type Item = JobApplication;

  fn title(&self) -> String {
    "Careers".to_string()
  }

  fn query(&self, hooks: &Hooks, page: u32, limit: u32, _search: Option<&str>) -> QueryDef<Self::Data> {
    hooks.job_applications(page, limit)
  }

  fn items<'a>(&self, data: &'a Self::Data) -> &'a [JobApplication] {
    &data.data.items
  }

  fn page_info(&self, data: &Self::Data) -> PageInfo {
    data.data.info()
  }

  fn row(&self, j: &JobApplication) -> Line<'static> {
    Line::from(vec![
      Span::raw(cell(&j.name, 24)),
      Span::raw(" "),
      Span::styled(cell(&j.role, 20), Style::default().fg(Color::Yellow)),
      Span::raw(" "),
      Span::raw(cell(&j.email, 28)),
      Span::raw(" "),
      Span::styled(j.cv_link.clone().unwrap_or_default(), Style::default().fg(Color::DarkGray)),
    ])
  }

  fn id(&self, j: &JobApplication) -> String {
    j.id.clone()
  }

  fn name(&self, j: &JobApplication) -> String {
    j.name.clone()
  }
}

/// Newsletter subscribers (the contact-us form).
pub struct ContactListing;

impl Listing for ContactListing {
  type Data = ApiResponse<Page<ContactUs>>;
  type Item = ContactUs;

  fn title(&self) -> String {
    "Subscribers".to_string()
  }

  fn query(&self, hooks: &Hooks, page: u32, limit: u32, _search: Option<&str>) -> QueryDef<Self::Data> {
    hooks.subscribers(page, limit)
  }

  fn items<'a>(&self, data: &'a Self::Data) -> &'a [ContactUs] {
    &data.data.items
  }

  fn page_info(&self, data: &Self::Data) -> PageInfo {
    data.data.info()
  }

  fn row(&self, c: &ContactUs) -> Line<'static> {
    Line::raw(c.email.clone())
  }

  fn id(&self, c: &ContactUs) -> String {
    c.id.clone()
  }

  fn name(&self, c: &ContactUs) -> String {
    c.email.clone()
  }
}
