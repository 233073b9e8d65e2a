use super::{keys, Hooks};
use crate::api::types::{ApiResponse, MerchantStaff, Page, Single, StaffRequest};
use crate::api::ApiError;
use crate::notify::Notification;
use crate::query::{MutationSpec, QueryDef};

type StaffPage = ApiResponse<Page<MerchantStaff>>;
type StaffResponse = ApiResponse<Single<MerchantStaff>>;

impl Hooks {
  pub fn merchant_staffs(&self, page: u32, limit: u32) -> QueryDef<StaffPage> {
    self.query(
      keys::staffs(page, limit),
      self.options().keep_previous_data(),
      move |api| async move { api.fetch_merchant_staffs(page, limit).await },
    )
  }

  /// Idle until a merchant is chosen.
  pub fn merchant_staffs_by_merchant(&self, merchant_id: &str) -> QueryDef<StaffPage> {
    let id = merchant_id.to_string();
    let options = self
      .options()
      .no_retry()
      .keep_previous_data()
      .enabled(!merchant_id.is_empty());
    self.query(keys::staffs_by_merchant(merchant_id), options, move |api| {
      let id = id.clone();
      async move { api.fetch_merchant_staffs_by_merchant(&id).await }
    })
  }

  /// Idle until a store is chosen.
  pub fn merchant_staffs_by_store(&self, store_id: &str) -> QueryDef<StaffPage> {
    let id = store_id.to_string();
    let options = self
      .options()
      .no_retry()
      .keep_previous_data()
      .enabled(!store_id.is_empty());
    self.query(keys::staffs_by_store(store_id), options, move |api| {
      let id = id.clone();
      async move { api.fetch_merchant_staffs_by_store(&id).await }
    })
  }

  pub async fn create_staff_for_merchant(
    &self,
    merchant_id: &str,
    payload: &StaffRequest,
  ) -> Result<StaffResponse, ApiError> {
    let spec = MutationSpec::new("Create merchant owner")
      .invalidates(keys::all(keys::STAFFS))
      .invalidates(keys::all(keys::STAFFS_BY_MERCHANT))
      .notify_success(|_| Notification::success("Success", "Merchant Owner Created Successfully"));
    self
      .mutate(spec, self.api.create_staff_for_merchant(merchant_id, payload))
      .await
  }

  pub async fn create_staff_for_store(&self, store_id: &str, payload: &StaffRequest) -> Result<StaffResponse, ApiError> {
    let spec = MutationSpec::new("Create store staff")
      .invalidates(keys::all(keys::STAFFS))
      .invalidates(keys::all(keys::STAFFS_BY_STORE))
      .notify_success(|_| Notification::success("Success", "Staff For Merchant Store Created Successfully"));
    self
      .mutate(spec, self.api.create_staff_for_store(store_id, payload))
      .await
  }
}

#[cfg(test)]
mod tests {
  use crate::api::types::{StaffRequest, StaffRole};
  use crate::hooks::keys;
  use crate::hooks::test_support::{expect, fixture};
  use crate::query::QueryStatus;
  use serde_json::json;

  fn request() -> StaffRequest {
    StaffRequest {
      first_name: "Ravi".into(),
      last_name: Some("Kumar".into()),
      email: "ravi@chai.in".into(),
      role: StaffRole::Owner,
    }
  }

  #[tokio::test]
  async fn test_create_for_store_invalidates_store_staff_lists() {
    let fx = fixture().await;
    fx.seed();
    fx.respond(
      "POST",
      "/api/merchant-staff/merchant/store/st1",
      201,
      json!({ "data": { "staff": { "_id": "u1", "firstName": "Ravi", "email": "ravi@chai.in", "role": "OWNER" } } }),
    )
    .await;

    fx.hooks.create_staff_for_store("st1", &request()).await.unwrap();

    assert_eq!(
      fx.invalidated(),
      expect(&[keys::all(keys::STAFFS), keys::all(keys::STAFFS_BY_STORE)])
    );
    assert_eq!(fx.notifier.take()[0].message, "Staff For Merchant Store Created Successfully");
  }

  #[tokio::test]
  async fn test_create_for_merchant_leaves_store_staff_alone() {
    let fx = fixture().await;
    fx.seed();
    fx.respond(
      "POST",
      "/api/merchant-staff/merchant/m1",
      201,
      json!({ "data": { "staff": { "_id": "u1", "firstName": "Ravi", "email": "ravi@chai.in", "role": "OWNER" } } }),
    )
    .await;

    fx.hooks.create_staff_for_merchant("m1", &request()).await.unwrap();

    assert_eq!(
      fx.invalidated(),
      expect(&[keys::all(keys::STAFFS), keys::all(keys::STAFFS_BY_MERCHANT)])
    );
  }

  #[tokio::test]
  async fn test_staff_by_merchant_waits_for_an_id() {
    let fx = fixture().await;
    let mut observer = fx.hooks.observe(fx.hooks.merchant_staffs_by_merchant(""));
    observer.mount();

    assert_eq!(observer.result().status, QueryStatus::Idle);
    assert!(fx.server.received_requests().await.unwrap().is_empty());
  }
}
