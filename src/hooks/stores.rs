use super::{keys, Hooks};
use crate::api::types::{ApiResponse, Page, Single, StoreLocation, StoreLocationRequest};
use crate::api::ApiError;
use crate::notify::Notification;
use crate::query::{MutationSpec, QueryDef};

type StoreResponse = ApiResponse<Single<StoreLocation>>;

impl Hooks {
  pub fn store_location(&self, store_id: &str) -> QueryDef<StoreResponse> {
    let id = store_id.to_string();
    let options = self.options().enabled(!store_id.is_empty());
    self.query(keys::store_location(store_id), options, move |api| {
      let id = id.clone();
      async move { api.fetch_store_location(&id).await }
    })
  }

  pub fn store_locations(&self, merchant_id: &str, page: u32, limit: u32) -> QueryDef<ApiResponse<Page<StoreLocation>>> {
    let id = merchant_id.to_string();
    let options = self
      .options()
      .no_retry()
      .keep_previous_data()
      .enabled(!merchant_id.is_empty());
    self.query(keys::store_locations(merchant_id, page, limit), options, move |api| {
      let id = id.clone();
      async move { api.fetch_store_locations(&id, page, limit).await }
    })
  }

  pub async fn create_store_location(
    &self,
    merchant_id: &str,
    data: &StoreLocationRequest,
  ) -> Result<StoreResponse, ApiError> {
    let spec = MutationSpec::new("Create store")
      .invalidates(keys::all(keys::MERCHANTS))
      .invalidates(keys::all(keys::STORE_LOCATIONS))
      .notify_success(|_| Notification::success("Success", "Merchant Store Created Successfully"));
    self
      .mutate(spec, self.api.create_store_location(merchant_id, data))
      .await
  }

  pub async fn remove_store_location(&self, store_id: &str) -> Result<StoreResponse, ApiError> {
    let spec = MutationSpec::<StoreResponse>::new("Remove store")
      .invalidates(keys::all(keys::MERCHANTS))
      .invalidates(keys::all(keys::STORE_LOCATIONS))
      .notify_success(|res| Notification::success("Success", format!("{} has been removed", res.data.item.name)));
    self.mutate(spec, self.api.remove_store_location(store_id)).await
  }

  pub async fn toggle_store_location_active(&self, store_id: &str, status: bool) -> Result<StoreResponse, ApiError> {
    let spec = MutationSpec::new("Toggle store active").invalidates(keys::all(keys::STORE_LOCATIONS));
    self
      .mutate(spec, self.api.toggle_store_location_active(store_id, status))
      .await
  }

  pub async fn toggle_store_location_verified(&self, store_id: &str, status: bool) -> Result<StoreResponse, ApiError> {
    let spec = MutationSpec::new("Toggle store verified").invalidates(keys::all(keys::STORE_LOCATIONS));
    self
      .mutate(spec, self.api.toggle_store_location_verified(store_id, status))
      .await
  }
}
