use super::{keys, Hooks};
use crate::api::types::{ApiResponse, Categories, Category, CategoryRequest, Merchant, MerchantRequest, Page, Single};
use crate::api::ApiError;
use crate::notify::Notification;
use crate::query::{MutationSpec, QueryDef};

type MerchantResponse = ApiResponse<Single<Merchant>>;
type CategoryResponse = ApiResponse<Single<Category>>;

impl Hooks {
  pub fn merchants(&self, page: u32, limit: u32, search: Option<&str>) -> QueryDef<ApiResponse<Page<Merchant>>> {
    let search = search.filter(|s| !s.is_empty()).map(str::to_string);
    let key = keys::merchants(page, limit, search.as_deref());
    self.query(key, self.options().keep_previous_data(), move |api| {
      let search = search.clone();
      async move { api.fetch_merchants(page, limit, search.as_deref()).await }
    })
  }

  pub fn merchant(&self, merchant_id: &str) -> QueryDef<MerchantResponse> {
    let id = merchant_id.to_string();
    self.query(keys::merchant(merchant_id), self.options(), move |api| {
      let id = id.clone();
      async move { api.fetch_merchant(&id).await }
    })
  }

  pub fn merchant_categories(&self) -> QueryDef<ApiResponse<Categories>> {
    self.query(
      keys::merchant_categories(),
      self.options().keep_previous_data(),
      |api| async move { api.fetch_merchant_categories().await },
    )
  }

  pub async fn create_merchant(&self, data: &MerchantRequest) -> Result<MerchantResponse, ApiError> {
    let spec = MutationSpec::new("Create merchant")
      .invalidates(keys::all(keys::MERCHANTS))
      .notify_success(|_| Notification::success("Success", "Merchant Onboarded Successfully"));
    self.mutate(spec, self.api.create_merchant(data)).await
  }

  pub async fn update_merchant(&self, merchant_id: &str, data: &MerchantRequest) -> Result<MerchantResponse, ApiError> {
    let spec = MutationSpec::new("Update merchant")
      .invalidates(keys::all(keys::MERCHANTS))
      .invalidates(keys::merchant(merchant_id))
      .notify_success(|_| Notification::success("Success", "Merchant Updated Successfully"));
    self.mutate(spec, self.api.update_merchant(merchant_id, data)).await
  }

  pub async fn remove_merchant(&self, merchant_id: &str) -> Result<MerchantResponse, ApiError> {
    let spec = MutationSpec::<MerchantResponse>::new("Remove merchant")
      .invalidates(keys::all(keys::MERCHANTS))
      .invalidates(keys::merchant(merchant_id))
      .notify_success(|res| Notification::success("Success", format!("{} has been removed", res.data.item.name)));
    self.mutate(spec, self.api.remove_merchant(merchant_id)).await
  }

  pub async fn toggle_merchant_active(&self, merchant_id: &str, status: bool) -> Result<MerchantResponse, ApiError> {
    let spec = MutationSpec::new("Toggle merchant active").invalidates(keys::all(keys::MERCHANTS));
    self.mutate(spec, self.api.toggle_merchant_active(merchant_id, status)).await
  }

  pub async fn toggle_merchant_verified(&self, merchant_id: &str, status: bool) -> Result<MerchantResponse, ApiError> {
    let spec = MutationSpec::new("Toggle merchant verified").invalidates(keys::all(keys::MERCHANTS));
    self.mutate(spec, self.api.toggle_merchant_verified(merchant_id, status)).await
  }

  pub async fn toggle_merchant_online(&self, merchant_id: &str, status: bool) -> Result<MerchantResponse, ApiError> {
    let spec = MutationSpec::new("Toggle merchant online").invalidates(keys::all(keys::MERCHANTS));
    self.mutate(spec, self.api.toggle_merchant_online(merchant_id, status)).await
  }

  pub async fn toggle_merchant_featured(&self, merchant_id: &str, status: bool) -> Result<MerchantResponse, ApiError> {
    let spec = MutationSpec::<MerchantResponse>::new("Toggle merchant featured")
      .invalidates(keys::all(keys::MERCHANTS))
      .invalidates_from(|res| vec![keys::merchant(&res.data.item.id)]);
    self.mutate(spec, self.api.toggle_merchant_featured(merchant_id, status)).await
  }

  pub async fn add_category_to_merchant(
    &self,
    merchant_id: &str,
    category_id: &str,
  ) -> Result<MerchantResponse, ApiError> {
    let spec = MutationSpec::<MerchantResponse>::new("Add merchant category")
      .invalidates(keys::all(keys::MERCHANTS))
      .invalidates_from(|res| vec![keys::merchant(&res.data.item.id)])
      .notify_success(|_| Notification::success("Success", "Merchant category added successfully"));
    self
      .mutate(spec, self.api.add_category_to_merchant(merchant_id, category_id))
      .await
  }

  pub async fn create_merchant_category(&self, data: &CategoryRequest) -> Result<CategoryResponse, ApiError> {
    let spec = MutationSpec::new("Create category")
      .invalidates(keys::categories())
      .invalidates(keys::merchant_categories())
      .notify_success(|_| Notification::success("Success", "Category created successfully"));
    self.mutate(spec, self.api.create_merchant_category(data)).await
  }

  pub async fn delete_merchant_category(&self, category_id: &str) -> Result<CategoryResponse, ApiError> {
    let spec = MutationSpec::new("Delete category")
      .invalidates(keys::categories())
      .invalidates(keys::merchant_categories())
      .notify_success(|_| Notification::success("Success", "Category deleted successfully"))
      .notify_error(|err| Notification::error("Error", format!("Failed to delete category: {}", err.user_message())));
    self.mutate(spec, self.api.delete_merchant_category(category_id)).await
  }
}
