//! Query keys, one constructor per read hook.
//!
//! The first element names the resource; mutations invalidate by that
//! prefix, optionally narrowed by an id.

use crate::query::QueryKey;
use crate::query_key;

pub const MERCHANTS: &str = "merchants";
pub const MERCHANT: &str = "merchant";
pub const MERCHANT_CATEGORIES: &str = "merchant-categories";
pub const CATEGORIES: &str = "categories";
pub const STAFFS: &str = "merchant-staffs";
pub const STAFFS_BY_MERCHANT: &str = "merchant-staffs-by-merchant";
pub const STAFFS_BY_STORE: &str = "merchant-staffs-by-store-location";
pub const STORE_LOCATIONS: &str = "merchant-store-locations";
pub const INSTITUTIONS: &str = "institutions";
pub const KYS: &str = "kys";
pub const STUDENTS: &str = "students";
pub const STUDENT: &str = "student";
pub const STUDENT_LEADS: &str = "student-leads";
pub const JOB_APPLICANTS: &str = "jobApplicants";
pub const CONTACT_US: &str = "contactus";
pub const SOCIAL_EVENTS: &str = "social-event";
pub const SOCIAL_EVENT_TRANSACTIONS: &str = "social-event-transactions";
pub const SUBJECTS: &str = "subject";
pub const TOPICS: &str = "topic";

/// Key covering every query of one resource.
pub fn all(resource: &str) -> QueryKey {
  query_key![resource]
}

/// Empty search is the same query as no search.
pub fn merchants(page: u32, limit: u32, search: Option<&str>) -> QueryKey {
  query_key![MERCHANTS, page, limit, search.filter(|s| !s.is_empty())]
}

pub fn merchant(merchant_id: &str) -> QueryKey {
  query_key![MERCHANT, merchant_id]
}

pub fn merchant_categories() -> QueryKey {
  query_key![MERCHANT_CATEGORIES]
}

pub fn categories() -> QueryKey {
  query_key![CATEGORIES]
}

pub fn staffs(page: u32, limit: u32) -> QueryKey {
  query_key![STAFFS, page, limit]
}

pub fn staffs_by_merchant(merchant_id: &str) -> QueryKey {
  query_key![STAFFS_BY_MERCHANT, merchant_id]
}

pub fn staffs_by_store(store_id: &str) -> QueryKey {
  query_key![STAFFS_BY_STORE, store_id]
}

pub fn store_location(store_id: &str) -> QueryKey {
  query_key![STORE_LOCATIONS, store_id]
}

pub fn store_locations(merchant_id: &str, page: u32, limit: u32) -> QueryKey {
  query_key![STORE_LOCATIONS, merchant_id, page, limit]
}

pub fn institutions(page: u32, limit: u32) -> QueryKey {
  query_key![INSTITUTIONS, page, limit]
}

pub fn kys(student_id: &str) -> QueryKey {
  query_key![KYS, student_id]
}

pub fn students(page: u32, limit: u32) -> QueryKey {
  query_key![STUDENTS, page, limit]
}

pub fn student(student_id: &str) -> QueryKey {
  query_key![STUDENT, student_id]
}

pub fn student_leads(page: u32, limit: u32) -> QueryKey {
  query_key![STUDENT_LEADS, page, limit]
}

pub fn job_applicants(page: u32, limit: u32) -> QueryKey {
  query_key![JOB_APPLICANTS, page, limit]
}

pub fn contact_us(page: u32, limit: u32) -> QueryKey {
  query_key![CONTACT_US, page, limit]
}

pub fn social_events(page: u32, limit: u32) -> QueryKey {
  query_key![SOCIAL_EVENTS, page, limit]
}

pub fn social_event_transactions(
  event_id: &str,
  page: Option<u32>,
  limit: Option<u32>,
  is_valid: Option<bool>,
) -> QueryKey {
  query_key![SOCIAL_EVENT_TRANSACTIONS, event_id, page, limit, is_valid]
}

pub fn subjects(offset: u32, limit: u32) -> QueryKey {
  query_key![SUBJECTS, offset, limit]
}

pub fn topics(subject_id: &str, offset: u32, limit: u32) -> QueryKey {
  query_key![TOPICS, subject_id, offset, limit]
}
