//! Serde types mirroring backend records.
//!
//! The client holds no authoritative state: these are cached copies of what
//! the backend returns, plus the request shapes it accepts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

// ============================================================================
// Envelope and collections
// ============================================================================

/// Every response is wrapped as `{ data, message? }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
  pub data: T,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
}

/// Page-based pagination (`page` is 1-based).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
  #[serde(default)]
  pub page: u32,
  #[serde(default)]
  pub limit: u32,
  #[serde(default)]
  pub total_pages: u32,
  #[serde(default)]
  pub total_docs: u64,
}

/// Offset-based pagination used by the subject/topic endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetPagination {
  #[serde(default)]
  pub index: u32,
  pub previous: Option<u64>,
  pub next: Option<u64>,
  #[serde(default)]
  pub limit: u32,
  #[serde(default)]
  pub offset: i64,
  #[serde(default)]
  pub count: u64,
  #[serde(default)]
  pub pages: u32,
}

/// Position of a page within its collection, whichever convention produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
  /// 1-based page number
  pub page: u32,
  pub total_pages: u32,
  pub total: u64,
}

pub trait Paginator {
  /// Whether a page holding `items` entries is consistent with this metadata.
  fn is_consistent(&self, items: usize) -> bool;

  fn info(&self) -> PageInfo;
}

impl Paginator for Pagination {
  fn is_consistent(&self, items: usize) -> bool {
    self.page >= 1 && items <= self.limit as usize
  }

  fn info(&self) -> PageInfo {
    PageInfo {
      page: self.page,
      total_pages: self.total_pages,
      total: self.total_docs,
    }
  }
}

impl Paginator for OffsetPagination {
  fn is_consistent(&self, items: usize) -> bool {
    self.offset >= 0 && items <= self.limit as usize
  }

  fn info(&self) -> PageInfo {
    PageInfo {
      page: self.index.saturating_add(1),
      total_pages: self.pages,
      total: self.count,
    }
  }
}

/// One page of a collection.
///
/// The backend names the list after the resource (`merchants`, `students`,
/// ...); the aliases cover every name it uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T, P = Pagination> {
  #[serde(
    alias = "merchants",
    alias = "merchantsStaffs",
    alias = "allStaffsOfAMerchant",
    alias = "allStaffsOfAMerchantStore",
    alias = "merchantStoreLocations",
    alias = "institutions",
    alias = "students",
    alias = "jobApplicants",
    alias = "contactus",
    alias = "socialEvents",
    alias = "socialEventTransaction",
    alias = "subjects",
    alias = "topics"
  )]
  pub items: Vec<T>,
  pub pagination: P,
}

impl<T, P: Paginator> Page<T, P> {
  pub fn is_consistent(&self) -> bool {
    self.pagination.is_consistent(self.items.len())
  }

  pub fn info(&self) -> PageInfo {
    self.pagination.info()
  }
}

/// A single-record payload such as `{ merchant: {...} }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Single<T> {
  #[serde(
    alias = "merchant",
    alias = "category",
    alias = "merchantStore",
    alias = "staff",
    alias = "institution",
    alias = "kysDetails",
    alias = "student",
    alias = "socialEvent",
    alias = "socialEventTransactionMarkValid",
    alias = "subject",
    alias = "topic",
    alias = "file",
    alias = "user"
  )]
  pub item: T,
}

/// `{ categories: [...] }`, the one unpaginated list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Categories {
  pub categories: Vec<Category>,
}

// ============================================================================
// Enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessType {
  Personal,
  Franchises,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Plan {
  Launch,
  Standard,
  Premium,
  Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StaffRole {
  Staff,
  Manager,
  Owner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KysVerificationStatus {
  Pending,
  InProgress,
  Completed,
  Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KysStep {
  Aadhaar,
  CollegeEmail,
  CollegeIdCard,
  RegistrationCertificate,
  AdditionalDocument,
  Video,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
  Cash,
  Upi,
  Card,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
  Male,
  Female,
  NonBinary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthType {
  Google,
  Facebook,
  Email,
  Phone,
}

// ============================================================================
// Shared nested shapes
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Upload {
  #[serde(rename = "_id")]
  pub id: String,
  pub path: String,
  #[serde(default)]
  pub mime_type: Option<String>,
  #[serde(default)]
  pub size: Option<String>,
  #[serde(default)]
  pub created_at: Option<String>,
  #[serde(default)]
  pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
  pub lat: f64,
  pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
  pub formatted_address: String,
  pub city: String,
  pub state: String,
  pub country: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub zip_code: Option<u32>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub locality: Option<String>,
  pub coordinates: Coordinates,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactNumber {
  pub country_code: String,
  pub number: String,
}

impl ContactNumber {
  /// "+91 9876543210", or `None` when both parts are empty.
  pub fn display(&self) -> Option<String> {
    join_non_empty([self.country_code.as_str(), self.number.as_str()])
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonName {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub first_name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub middle_name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub last_name: Option<String>,
}

impl PersonName {
  /// First, middle and last name joined, skipping empty parts.
  pub fn display(&self) -> Option<String> {
    join_non_empty([
      self.first_name.as_deref().unwrap_or_default(),
      self.middle_name.as_deref().unwrap_or_default(),
      self.last_name.as_deref().unwrap_or_default(),
    ])
  }
}

fn join_non_empty<'a>(parts: impl IntoIterator<Item = &'a str>) -> Option<String> {
  let joined = parts
    .into_iter()
    .filter(|p| !p.is_empty())
    .collect::<Vec<_>>()
    .join(" ");
  (!joined.is_empty()).then_some(joined)
}

// ============================================================================
// Users and auth
// ============================================================================

/// Admin user as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id: u64,
  #[serde(default)]
  pub first_name: String,
  #[serde(default)]
  pub middle_name: String,
  #[serde(default)]
  pub last_name: String,
  pub email: String,
  #[serde(default)]
  pub contact: String,
  #[serde(default)]
  pub date_of_birth: Option<String>,
  #[serde(default)]
  pub address_line_1: String,
  #[serde(default)]
  pub address_line_2: String,
  #[serde(default)]
  pub state: String,
  #[serde(default)]
  pub city: String,
  #[serde(default)]
  pub zip: String,
  #[serde(default)]
  pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
  pub email: String,
  pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginPayload {
  pub user: User,
  pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPayload {
  pub user: User,
}

// ============================================================================
// Merchants
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
  #[serde(rename = "_id")]
  pub id: String,
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image: Option<Upload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRequest {
  pub name: String,
  /// Upload id of the category image
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Merchant {
  #[serde(rename = "_id")]
  pub id: String,
  #[serde(default)]
  pub unique_id: String,
  pub name: String,
  #[serde(default)]
  pub email: Option<String>,
  #[serde(default)]
  pub website_link: Option<String>,
  #[serde(default)]
  pub redirection_link: Option<String>,
  #[serde(default)]
  pub address: Option<Address>,
  #[serde(default)]
  pub logo: Option<Upload>,
  #[serde(default)]
  pub owner: Option<PersonName>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub gst_number: Option<String>,
  #[serde(default)]
  pub food_license: Option<String>,
  #[serde(default)]
  pub trade_license: Option<String>,
  #[serde(default)]
  pub business_type: Option<BusinessType>,
  #[serde(default)]
  pub plans: Option<Plan>,
  #[serde(default)]
  pub scoins: Option<f64>,
  #[serde(default)]
  pub public_contact_number: Option<ContactNumber>,
  #[serde(default)]
  pub private_contact_number: Option<ContactNumber>,
  #[serde(default)]
  pub is_verified: Option<bool>,
  #[serde(default)]
  pub is_online: Option<bool>,
  #[serde(default)]
  pub is_active: Option<bool>,
  #[serde(default)]
  pub is_featured: Option<bool>,
  #[serde(default)]
  pub category: Vec<Category>,
  #[serde(default)]
  pub store_locations: Vec<String>,
  #[serde(default)]
  pub discount: f64,
  #[serde(default)]
  pub created_at: Option<String>,
  #[serde(default)]
  pub updated_at: Option<String>,
}

/// Create/update body for a merchant. `logo` is an upload id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantRequest {
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub email: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub website_link: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub redirection_link: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub address: Option<Address>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub logo: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub owner: Option<PersonName>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub gst_number: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub food_license: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub trade_license: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub business_type: Option<BusinessType>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub plans: Option<Plan>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub scoins: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub public_contact_number: Option<ContactNumber>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub private_contact_number: Option<ContactNumber>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub is_verified: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub is_online: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub is_active: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub is_featured: Option<bool>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub category: Vec<String>,
  pub discount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreLocation {
  #[serde(rename = "_id")]
  pub id: String,
  #[serde(default)]
  pub unique_id: String,
  #[serde(default)]
  pub merchant_id: Option<String>,
  pub name: String,
  #[serde(default)]
  pub email: Option<String>,
  pub address: Address,
  #[serde(default)]
  pub owner: Option<PersonName>,
  #[serde(default)]
  pub public_contact_number: Option<ContactNumber>,
  #[serde(default)]
  pub private_contact_number: Option<ContactNumber>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub plans: Option<Plan>,
  #[serde(default)]
  pub scoins: Option<f64>,
  #[serde(default)]
  pub cost_for_one: Option<f64>,
  #[serde(default)]
  pub listings: Vec<String>,
  #[serde(default)]
  pub is_verified: Option<bool>,
  #[serde(default)]
  pub is_active: Option<bool>,
  #[serde(default)]
  pub category: Vec<String>,
  #[serde(default)]
  pub food_license: Option<String>,
  #[serde(default)]
  pub trade_license: Option<String>,
  #[serde(default)]
  pub gst_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreLocationRequest {
  #[serde(default)]
  pub unique_id: String,
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub email: Option<String>,
  pub address: Address,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub owner: Option<PersonName>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub public_contact_number: Option<ContactNumber>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub private_contact_number: Option<ContactNumber>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub plans: Option<Plan>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub cost_for_one: Option<f64>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub category: Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub gst_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantStaff {
  #[serde(rename = "_id")]
  pub id: String,
  pub first_name: String,
  #[serde(default)]
  pub last_name: Option<String>,
  pub email: String,
  pub role: StaffRole,
  /// Populated as a full record by the list endpoints, an id elsewhere
  #[serde(default)]
  pub merchant: Option<Value>,
  #[serde(default)]
  pub merchant_store: Option<Value>,
}

impl MerchantStaff {
  /// Name of the owning merchant when the record was populated.
  pub fn merchant_name(&self) -> Option<&str> {
    self.merchant.as_ref()?.get("name")?.as_str()
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffRequest {
  pub first_name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub last_name: Option<String>,
  pub email: String,
  pub role: StaffRole,
}

// ============================================================================
// Institutions and students
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Institution {
  #[serde(rename = "_id")]
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub established_at: Option<String>,
  #[serde(default)]
  pub logo: Option<String>,
  #[serde(default)]
  pub current_director: Option<String>,
  #[serde(default)]
  pub helpline: Option<ContactNumber>,
  #[serde(default)]
  pub website: Option<String>,
  #[serde(default)]
  pub address: Option<Address>,
  #[serde(default)]
  pub is_verified: bool,
  #[serde(default)]
  pub board: Option<String>,
  #[serde(default)]
  pub affiliated_to: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionRequest {
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub established_at: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub logo: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub current_director: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub helpline: Option<ContactNumber>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub website: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub address: Option<Address>,
  pub is_verified: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub board: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub affiliated_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicSession {
  pub start_year: String,
  pub end_year: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
  #[serde(rename = "_id")]
  pub id: String,
  #[serde(default)]
  pub sconto_id: Option<String>,
  #[serde(default)]
  pub first_name: Option<String>,
  #[serde(default)]
  pub middle_name: Option<String>,
  #[serde(default)]
  pub last_name: Option<String>,
  #[serde(default)]
  pub gender: Option<Gender>,
  #[serde(default)]
  pub dob: Option<String>,
  #[serde(default)]
  pub profile_picture: Option<String>,
  #[serde(default)]
  pub initial_verification_with: Option<AuthType>,
  #[serde(default)]
  pub email: Option<String>,
  #[serde(default)]
  pub institution: Option<Institution>,
  #[serde(default)]
  pub academic_session: Option<AcademicSession>,
  #[serde(default)]
  pub contact_number: Option<ContactNumber>,
  #[serde(default)]
  pub address: Option<Address>,
  #[serde(default)]
  pub is_email_verified: Option<bool>,
  #[serde(default)]
  pub is_phone_verified: Option<bool>,
  #[serde(default)]
  pub is_verified: Option<bool>,
  #[serde(default)]
  pub is_registered: Option<bool>,
  #[serde(default)]
  pub is_tribe_partner: Option<bool>,
  #[serde(default)]
  pub referral_code: Option<String>,
  #[serde(default)]
  pub language: Option<String>,
  #[serde(default)]
  pub scoins: Option<f64>,
  #[serde(default)]
  pub deactivated: Option<bool>,
}

impl Student {
  pub fn name(&self) -> Option<String> {
    PersonName {
      first_name: self.first_name.clone(),
      middle_name: self.middle_name.clone(),
      last_name: self.last_name.clone(),
    }
    .display()
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentLead {
  #[serde(rename = "_id", default)]
  pub id: Option<String>,
  #[serde(default)]
  pub full_name: Option<String>,
  #[serde(default)]
  pub email: Option<String>,
  #[serde(default)]
  pub college_email: Option<String>,
  #[serde(default)]
  pub contact_number: Option<ContactNumber>,
  #[serde(default)]
  pub institution: Option<String>,
  #[serde(default)]
  pub city: Option<String>,
  #[serde(default)]
  pub state: Option<String>,
  #[serde(default)]
  pub academic_session: Option<AcademicSession>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
  #[serde(rename = "_id")]
  pub id: String,
  pub name: String,
  pub email: String,
  #[serde(default)]
  pub phone_number: Option<ContactNumber>,
  pub role: String,
  #[serde(default)]
  pub cv_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactUs {
  #[serde(rename = "_id")]
  pub id: String,
  pub email: String,
}

// ============================================================================
// KYS (know your student)
// ============================================================================

/// Free-form document fields sent by the KYS update forms.
pub type KysFields = BTreeMap<String, Value>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationStatus {
  #[serde(default)]
  pub is_aadhaar_verified: bool,
  #[serde(default)]
  pub is_registration_certificate_verified: bool,
  #[serde(default)]
  pub is_college_id_card_verified: bool,
  #[serde(default)]
  pub is_additional_documents_verified: bool,
  #[serde(default, rename = "isVideoKYSDocumentVerified")]
  pub is_video_kys_document_verified: bool,
  #[serde(default)]
  pub is_college_email_verified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectionLog {
  #[serde(rename = "_id")]
  pub id: String,
  pub reason: String,
  #[serde(default)]
  pub date: Option<String>,
  pub issue_for: KysStep,
  #[serde(default)]
  pub rejected_by: Option<String>,
  #[serde(default)]
  pub resolved: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectionRequest {
  pub reason: String,
  pub issue_for: KysStep,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalDocument {
  pub key: String,
  pub label: String,
  pub file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KysDetails {
  #[serde(rename = "_id")]
  pub id: String,
  pub student: String,
  #[serde(default)]
  pub aadhaar_number: Option<String>,
  #[serde(default)]
  pub aadhaar_document: Option<String>,
  #[serde(default)]
  pub aadhaar_details: Option<Value>,
  #[serde(default)]
  pub registration_certificate_number: Option<String>,
  #[serde(default)]
  pub registration_certificate_document: Option<String>,
  #[serde(default)]
  pub registration_certificate_details: Option<KysFields>,
  #[serde(default)]
  pub college_id_card_number: Option<String>,
  #[serde(default)]
  pub college_id_card_document: Option<String>,
  #[serde(default)]
  pub college_id_card_details: Option<KysFields>,
  #[serde(default)]
  pub additional_documents: Vec<AdditionalDocument>,
  #[serde(default, rename = "videoKYSDocument")]
  pub video_kys_document: Option<String>,
  #[serde(default, rename = "videoKYSTranscript")]
  pub video_kys_transcript: Option<String>,
  #[serde(default)]
  pub college_email: Option<String>,
  #[serde(default)]
  pub status: Option<KysVerificationStatus>,
  #[serde(default)]
  pub verification_score: Option<f64>,
  /// Between 0 and 1
  #[serde(default)]
  pub verification_percentage: Option<f64>,
  #[serde(default)]
  pub verification_status: VerificationStatus,
  #[serde(default)]
  pub verification_rejection_logs: Vec<RejectionLog>,
  #[serde(default)]
  pub expiry_date: Option<String>,
}

// ============================================================================
// Social events
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialEvent {
  #[serde(rename = "_id")]
  pub id: String,
  pub name: String,
  pub start_date: String,
  pub end_date: String,
  #[serde(default)]
  pub image: Option<Upload>,
  #[serde(default)]
  pub payment_methods: Vec<PaymentMethod>,
  #[serde(default)]
  pub upi_id: Option<String>,
  #[serde(default)]
  pub instructions: Option<String>,
  #[serde(default)]
  pub actual_price: String,
  #[serde(default)]
  pub discount_percentage: String,
  #[serde(default)]
  pub discounted_price: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialEventRequest {
  pub name: String,
  pub start_date: String,
  pub end_date: String,
  /// Upload id of the event image
  pub image: String,
  pub payment_methods: Vec<PaymentMethod>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub upi_id: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub instructions: Option<String>,
  pub actual_price: String,
  pub discount_percentage: String,
  pub discounted_price: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialEventTransaction {
  #[serde(rename = "_id")]
  pub id: String,
  #[serde(default)]
  pub event: Option<Value>,
  #[serde(default)]
  pub student: Option<Value>,
  #[serde(default)]
  pub transaction_id: Option<String>,
  #[serde(default)]
  pub is_transaction_valid: bool,
  #[serde(default)]
  pub transaction_proof: Option<Upload>,
}

// ============================================================================
// Subjects and topics
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
  #[serde(rename = "_id")]
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub subject: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
  #[serde(rename = "_id")]
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub topics: Vec<Topic>,
}

/// Create/update body shared by subjects and topics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameRequest {
  pub name: String,
}
