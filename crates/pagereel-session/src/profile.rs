//! The profile view: a user's submitted works and liked-asset library.

use serde::Serialize;

use pagereel_models::{AssetKind, LikedAsset, TaskRecord};
use pagereel_supabase::{AuthUser, LibraryRepository, TaskRepository};

use crate::error::{SessionError, SessionResult};

/// Everything the profile page renders, loaded in one shot.
///
/// Liked assets come back pre-split into the three library tabs.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub user_id: String,
    pub email: Option<String>,

    /// Submitted works, newest first.
    pub works: Vec<TaskRecord>,

    pub images: Vec<LikedAsset>,
    pub videos: Vec<LikedAsset>,
    pub gifs: Vec<LikedAsset>,
}

impl ProfileView {
    /// Load the view for a signed-in user. Without one there is nothing
    /// to show and the caller redirects to sign-in.
    pub async fn load(
        tasks: &TaskRepository,
        library: &LibraryRepository,
        user: Option<&AuthUser>,
    ) -> SessionResult<Self> {
        let user = user.ok_or(SessionError::AuthRequired)?;

        let works = tasks.list_for_user(&user.id).await?;
        let liked = library.list_for_user(&user.id).await?;

        let mut images = Vec::new();
        let mut videos = Vec::new();
        let mut gifs = Vec::new();
        for row in liked {
            match row.kind {
                AssetKind::Image => images.push(row),
                AssetKind::Video => videos.push(row),
                AssetKind::Gif => gifs.push(row),
            }
        }

        Ok(Self {
            user_id: user.id.clone(),
            email: user.email.clone(),
            works,
            images,
            videos,
            gifs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagereel_supabase::{SupabaseClient, SupabaseConfig};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn repos(server: &MockServer) -> (TaskRepository, LibraryRepository) {
        let client = SupabaseClient::new(SupabaseConfig {
            base_url: server.uri(),
            api_key: "service-key".to_string(),
            timeout: Duration::from_secs(3),
            connect_timeout: Duration::from_secs(1),
        })
        .unwrap();
        (
            TaskRepository::new(client.clone()),
            LibraryRepository::new(client),
        )
    }

    fn user() -> AuthUser {
        AuthUser {
            id: "user-1".to_string(),
            email: Some("a@example.com".to_string()),
        }
    }

    #[tokio::test]
    async fn test_load_requires_user() {
        let server = MockServer::start().await;
        let (tasks, library) = repos(&server);

        let err = ProfileView::load(&tasks, &library, None).await.unwrap_err();
        assert!(err.is_auth_required());
    }

    #[tokio::test]
    async fn test_load_groups_library_by_kind() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/task"))
            .and(query_param("user_id", "eq.user-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 7, "user_id": "user-1", "status": "completed",
                 "result_video_url": "https://cdn/x.mp4"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/assets"))
            .and(query_param("user_id", "eq.user-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"user_id": "user-1", "type": "image", "suffix": "jpg",
                 "url": "https://x/a.jpg", "md5": "m1"},
                {"user_id": "user-1", "type": "gif", "suffix": "gif",
                 "url": "https://x/b.gif", "md5": "m2"},
                {"user_id": "user-1", "type": "image", "suffix": "png",
                 "url": "https://x/c.png", "md5": "m3"}
            ])))
            .mount(&server)
            .await;

        let (tasks, library) = repos(&server);
        let view = ProfileView::load(&tasks, &library, Some(&user()))
            .await
            .unwrap();

        assert_eq!(view.user_id, "user-1");
        assert_eq!(view.email.as_deref(), Some("a@example.com"));
        assert_eq!(view.works.len(), 1);
        assert_eq!(view.works[0].id, Some(7));
        assert_eq!(view.images.len(), 2);
        assert_eq!(view.videos.len(), 0);
        assert_eq!(view.gifs.len(), 1);
        assert_eq!(view.gifs[0].url, "https://x/b.gif");
    }

    #[tokio::test]
    async fn test_load_surfaces_store_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/task"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (tasks, library) = repos(&server);
        let err = ProfileView::load(&tasks, &library, Some(&user()))
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Store(_)));
    }
}
