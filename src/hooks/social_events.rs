use super::{keys, Hooks};
use crate::api::types::{ApiResponse, Page, Single, SocialEvent, SocialEventRequest, SocialEventTransaction};
use crate::api::ApiError;
use crate::notify::Notification;
use crate::query::{MutationSpec, QueryDef};

impl Hooks {
  pub fn social_events(&self, page: u32, limit: u32) -> QueryDef<ApiResponse<Page<SocialEvent>>> {
    self.query(
      keys::social_events(page, limit),
      self.options().keep_previous_data(),
      move |api| async move { api.fetch_social_events(page, limit).await },
    )
  }

  pub fn social_event_transactions(
    &self,
    event_id: &str,
    page: Option<u32>,
    limit: Option<u32>,
    is_valid: Option<bool>,
  ) -> QueryDef<ApiResponse<Page<SocialEventTransaction>>> {
    let id = event_id.to_string();
    let options = self.options().keep_previous_data().enabled(!event_id.is_empty());
    let key = keys::social_event_transactions(event_id, page, limit, is_valid);
    self.query(key, options, move |api| {
      let id = id.clone();
      async move { api.fetch_social_event_transactions(&id, page, limit, is_valid).await }
    })
  }

  pub async fn create_social_event(&self, data: &SocialEventRequest) -> Result<ApiResponse<Single<SocialEvent>>, ApiError> {
    let spec = MutationSpec::new("Create social event")
      .invalidates(keys::all(keys::SOCIAL_EVENTS))
      .notify_success(|_| Notification::success("Success", "Social Event Created Successfully"));
    self.mutate(spec, self.api.create_social_event(data)).await
  }

  pub async fn mark_transaction_valid(
    &self,
    transaction_id: &str,
    is_valid: bool,
  ) -> Result<ApiResponse<Single<SocialEventTransaction>>, ApiError> {
    let spec = MutationSpec::new("Validate transaction")
      .invalidates(keys::all(keys::SOCIAL_EVENT_TRANSACTIONS))
      .notify_success(|_| Notification::success("Success", "Transaction Validation Successful!"));
    self
      .mutate(spec, self.api.mark_transaction_valid(transaction_id, is_valid))
      .await
  }
}

#[cfg(test)]
mod tests {
  use crate::hooks::keys;
  use crate::hooks::test_support::{expect, fixture};
  use serde_json::json;

  #[tokio::test]
  async fn test_validating_a_transaction_leaves_event_list_alone() {
    let fx = fixture().await;
    fx.seed();
    fx.respond(
      "PATCH",
      "/api/social-events/transactions/t1/mark-as-valid",
      200,
      json!({ "data": { "socialEventTransactionMarkValid": { "_id": "t1", "isTransactionValid": true } } }),
    )
    .await;

    fx.hooks.mark_transaction_valid("t1", true).await.unwrap();

    assert_eq!(
      fx.invalidated(),
      expect(&[keys::all(keys::SOCIAL_EVENT_TRANSACTIONS)])
    );
    assert_eq!(fx.notifier.take()[0].message, "Transaction Validation Successful!");
  }

  #[tokio::test]
  async fn test_create_event_leaves_transactions_alone() {
    let fx = fixture().await;
    fx.seed();
    fx.respond(
      "POST",
      "/api/social-events",
      201,
      json!({
        "data": {
          "socialEvent": { "_id": "e2", "name": "Holi Bash", "startDate": "2026-03-03", "endDate": "2026-03-04" }
        }
      }),
    )
    .await;

    let request = serde_json::from_value(json!({
      "name": "Holi Bash",
      "startDate": "2026-03-03",
      "endDate": "2026-03-04",
      "image": "up1",
      "paymentMethods": ["upi", "cash"],
      "actualPrice": "500",
      "discountPercentage": "20",
      "discountedPrice": "400"
    }))
    .unwrap();
    fx.hooks.create_social_event(&request).await.unwrap();

    assert_eq!(fx.invalidated(), expect(&[keys::all(keys::SOCIAL_EVENTS)]));
    assert_eq!(fx.notifier.take()[0].message, "Social Event Created Successfully");
  }
}
