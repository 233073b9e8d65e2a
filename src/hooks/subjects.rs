use super::{keys, Hooks};
use crate::api::types::{ApiResponse, OffsetPagination, Page, Single, Subject, Topic};
use crate::api::ApiError;
use crate::notify::Notification;
use crate::query::{MutationSpec, QueryDef};

type SubjectResponse = ApiResponse<Single<Subject>>;
type TopicResponse = ApiResponse<Single<Topic>>;

impl Hooks {
  pub fn subjects(&self, offset: u32, limit: u32) -> QueryDef<ApiResponse<Page<Subject, OffsetPagination>>> {
    self.query(
      keys::subjects(offset, limit),
      self.options().keep_previous_data(),
      move |api| async move { api.fetch_subjects(offset, limit).await },
    )
  }

  pub fn topics(&self, subject_id: &str, offset: u32, limit: u32) -> QueryDef<ApiResponse<Page<Topic, OffsetPagination>>> {
    let id = subject_id.to_string();
    let options = self.options().keep_previous_data().enabled(!subject_id.is_empty());
    self.query(keys::topics(subject_id, offset, limit), options, move |api| {
      let id = id.clone();
      async move { api.fetch_topics(&id, offset, limit).await }
    })
  }

  pub async fn create_subject(&self, name: &str) -> Result<SubjectResponse, ApiError> {
    let spec = MutationSpec::new("Create subject")
      .invalidates(keys::all(keys::SUBJECTS))
      .notify_success(|_| Notification::success("Success", "Subject Created Successfully"));
    self.mutate(spec, self.api.create_subject(name)).await
  }

  pub async fn update_subject(&self, subject_id: &str, name: &str) -> Result<SubjectResponse, ApiError> {
    let spec = MutationSpec::new("Update subject")
      .invalidates(keys::all(keys::SUBJECTS))
      .notify_success(|_| Notification::success("Success", "Subject Updated Successfully"));
    self.mutate(spec, self.api.update_subject(subject_id, name)).await
  }

  pub async fn remove_subject(&self, subject_id: &str) -> Result<SubjectResponse, ApiError> {
    let spec = MutationSpec::<SubjectResponse>::new("Remove subject")
      .invalidates(keys::all(keys::SUBJECTS))
      .notify_success(|res| {
        Notification::success("Success", format!("{} has been removed successfully!", res.data.item.name))
      });
    self.mutate(spec, self.api.remove_subject(subject_id)).await
  }

  pub async fn create_topic(&self, subject_id: &str, name: &str) -> Result<TopicResponse, ApiError> {
    let spec = MutationSpec::new("Create topic")
      .invalidates(keys::all(keys::TOPICS))
      .notify_success(|_| Notification::success("Success", "Topic Created Successfully"));
    self.mutate(spec, self.api.create_topic(subject_id, name)).await
  }

  pub async fn update_topic(&self, topic_id: &str, name: &str) -> Result<TopicResponse, ApiError> {
    let spec = MutationSpec::new("Update topic")
      .invalidates(keys::all(keys::TOPICS))
      .notify_success(|_| Notification::success("Success", "Topic Updated Successfully"));
    self.mutate(spec, self.api.update_topic(topic_id, name)).await
  }

  pub async fn remove_topic(&self, topic_id: &str) -> Result<TopicResponse, ApiError> {
    let spec = MutationSpec::<TopicResponse>::new("Remove topic")
      .invalidates(keys::all(keys::TOPICS))
      .notify_success(|res| {
        Notification::success("Success", format!("{} has been removed successfully!", res.data.item.name))
      });
    self.mutate(spec, self.api.remove_topic(topic_id)).await
  }
}

#[cfg(test)]
mod tests {
  use crate::hooks::keys;
  use crate::hooks::test_support::{expect, fixture};
  use crate::notify::Notification;
  use serde_json::json;

  #[tokio::test]
  async fn test_create_topic_announces_a_topic() {
    let fx = fixture().await;
    fx.seed();
    fx.respond(
      "POST",
      "/v1/api/subject/sub1/topic/create/",
      201,
      json!({ "data": { "topic": { "_id": "t1", "name": "Limits", "subject": "sub1" } } }),
    )
    .await;

    fx.hooks.create_topic("sub1", "Limits").await.unwrap();

    assert_eq!(fx.invalidated(), expect(&[keys::all(keys::TOPICS)]));
    assert_eq!(
      fx.notifier.take(),
      vec![Notification::success("Success", "Topic Created Successfully")]
    );
  }

  #[tokio::test]
  async fn test_remove_subject_leaves_topics_cached() {
    let fx = fixture().await;
    fx.seed();
    fx.respond(
      "DELETE",
      "/v1/api/subject/sub1/delete/",
      200,
      json!({ "data": { "subject": { "_id": "sub1", "name": "Calculus" } } }),
    )
    .await;

    fx.hooks.remove_subject("sub1").await.unwrap();

    assert_eq!(fx.invalidated(), expect(&[keys::all(keys::SUBJECTS)]));
    assert_eq!(fx.notifier.take()[0].message, "Calculus has been removed successfully!");
  }

  #[tokio::test]
  async fn test_subject_writes_invalidate_only_subjects() {
    for (verb, route) in [("POST", "/v1/api/subject/create/"), ("PUT", "/v1/api/subject/sub1/update/")] {
      let fx = fixture().await;
      fx.seed();
      fx.respond(
        verb,
        route,
        200,
        json!({ "data": { "subject": { "_id": "sub1", "name": "Algebra" } } }),
      )
      .await;

      if verb == "POST" {
        fx.hooks.create_subject("Algebra").await.unwrap();
      } else {
        fx.hooks.update_subject("sub1", "Algebra").await.unwrap();
      }

      assert_eq!(fx.invalidated(), expect(&[keys::all(keys::SUBJECTS)]), "{}", route);
    }
  }

  #[tokio::test]
  async fn test_topic_writes_invalidate_every_subjects_topics() {
    for (verb, route) in [("PUT", "/v1/api/subject/topic/t1/update/"), ("DELETE", "/v1/api/subject/topic/t1/delete/")] {
      let fx = fixture().await;
      fx.seed();
      fx.respond(
        verb,
        route,
        200,
        json!({ "data": { "topic": { "_id": "t1", "name": "Limits", "subject": "sub1" } } }),
      )
      .await;

      let message = if verb == "PUT" {
        fx.hooks.update_topic("t1", "Limits").await.unwrap();
        "Topic Updated Successfully"
      } else {
        fx.hooks.remove_topic("t1").await.unwrap();
        "Limits has been removed successfully!"
      };

      assert_eq!(fx.invalidated(), expect(&[keys::all(keys::TOPICS)]), "{}", route);
      assert_eq!(fx.notifier.take()[0].message, message);
    }
  }
}
