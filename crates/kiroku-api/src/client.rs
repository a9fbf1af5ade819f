use std::fmt;

use crate::error::MalError;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport, TransportConfig};
use crate::types::{AnimeSearchResult, EntryUpdate, ListSummary, User};
use crate::xml;

const VERIFY_PATH: &str = "/api/account/verify_credentials.xml";
const SEARCH_PATH: &str = "/api/anime/search.xml";
const LIST_PATH: &str = "/malappinfo.php";

const UPDATED_ACK: &str = "Updated";
const DELETED_ACK: &str = "Deleted";

/// Basic-auth credentials for one account.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// MyAnimeList XML API client.
pub struct MalClient<T = HttpTransport> {
    credentials: Credentials,
    transport: T,
}

impl MalClient<HttpTransport> {
    /// Build a client with the default transport (myanimelist.net, 30s timeout).
    pub fn new(credentials: Credentials) -> Result<Self, MalError> {
        Self::with_config(credentials, &TransportConfig::default())
    }

    pub fn with_config(
        credentials: Credentials,
        config: &TransportConfig,
    ) -> Result<Self, MalError> {
        Ok(Self::with_transport(credentials, HttpTransport::new(config)?))
    }
}

impl<T: Transport> MalClient<T> {
    pub fn with_transport(credentials: Credentials, transport: T) -> Self {
        Self {
            credentials,
            transport,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn request(&self, method: Method, path: String) -> ApiRequest<'_> {
        ApiRequest {
            method,
            path,
            query: Vec::new(),
            form: None,
            credentials: &self.credentials,
        }
    }

    /// Fail on anything but a 2xx status.
    fn check_status(resp: &ApiResponse) -> Result<(), MalError> {
        if resp.is_success() {
            Ok(())
        } else {
            tracing::warn!(status = resp.status, "MAL API error");
            Err(MalError::Auth {
                status: resp.status,
                status_text: resp.status_text.clone(),
            })
        }
    }

    /// Like [`Self::check_status`], but 204 also fails: the service answers
    /// bad credentials and empty searches with no content.
    fn check_content(resp: &ApiResponse) -> Result<(), MalError> {
        if resp.status == 204 {
            tracing::warn!(status = resp.status, "MAL API returned no content");
            return Err(MalError::Auth {
                status: resp.status,
                status_text: resp.status_text.clone(),
            });
        }
        Self::check_status(resp)
    }

    fn check_ack(resp: &ApiResponse, expected: &'static str) -> Result<(), MalError> {
        Self::check_status(resp)?;
        if resp.body == expected {
            Ok(())
        } else {
            tracing::warn!(expected, body = %resp.body, "unexpected MAL acknowledgement");
            Err(MalError::UnexpectedAcknowledgement {
                expected,
                body: resp.body.clone(),
            })
        }
    }

    fn payload_form(update: &EntryUpdate) -> Option<Vec<(&'static str, String)>> {
        Some(vec![("data", xml::encode_update(update))])
    }

    /// Check the credentials and return the account they belong to.
    pub async fn verify_credentials(&self) -> Result<User, MalError> {
        let resp = self
            .transport
            .send(self.request(Method::Get, VERIFY_PATH.to_string()))
            .await?;
        Self::check_content(&resp)?;
        xml::decode_user(&resp.body)
    }

    /// Search anime by title.
    pub async fn search(&self, query: &str) -> Result<Vec<AnimeSearchResult>, MalError> {
        let mut req = self.request(Method::Get, SEARCH_PATH.to_string());
        req.query.push(("q", query.to_string()));

        let resp = self.transport.send(req).await?;
        Self::check_content(&resp)?;
        xml::decode_search_results(&resp.body)
    }

    /// Fetch the full anime list of the credentials' user.
    pub async fn anime_list(&self) -> Result<ListSummary, MalError> {
        let mut req = self.request(Method::Get, LIST_PATH.to_string());
        req.query.extend([
            ("u", self.credentials.username.clone()),
            ("status", "all".to_string()),
            ("type", "anime".to_string()),
        ]);

        let resp = self.transport.send(req).await?;
        Self::check_status(&resp)?;
        xml::decode_list_summary(&resp.body)
    }

    /// Add an anime to the list.
    pub async fn add_entry(&self, anime_id: u64, update: &EntryUpdate) -> Result<(), MalError> {
        let mut req = self.request(Method::Post, format!("/api/animelist/add/{anime_id}.xml"));
        req.form = Self::payload_form(update);

        let resp = self.transport.send(req).await?;
        Self::check_status(&resp)
    }

    /// Replace the state of an existing list entry.
    pub async fn update_entry(&self, anime_id: u64, update: &EntryUpdate) -> Result<(), MalError> {
        let mut req = self.request(
            Method::Post,
            format!("/api/animelist/update/{anime_id}.xml"),
        );
        req.form = Self::payload_form(update);

        let resp = self.transport.send(req).await?;
        Self::check_ack(&resp, UPDATED_ACK)
    }

    pub async fn delete_entry(&self, anime_id: u64) -> Result<(), MalError> {
        let req = self.request(
            Method::Post,
            format!("/api/animelist/delete/{anime_id}.xml"),
        );
        let resp = self.transport.send(req).await?;
        Self::check_ack(&resp, DELETED_ACK)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Replays one canned response and records what was sent.
    struct CannedTransport {
        status: u16,
        body: String,
        sent: Mutex<Vec<Sent>>,
    }

    #[derive(Debug, Clone)]
    struct Sent {
        method: Method,
        path: String,
        query: Vec<(&'static str, String)>,
        form: Option<Vec<(&'static str, String)>>,
        username: String,
    }

    impl CannedTransport {
        fn new(status: u16, body: &str) -> Self {
            Self {
                status,
                body: body.to_string(),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn last(&self) -> Sent {
            self.sent.lock().unwrap().last().cloned().unwrap()
        }
    }

    impl Transport for CannedTransport {
        async fn send(&self, request: ApiRequest<'_>) -> Result<ApiResponse, MalError> {
            self.sent.lock().unwrap().push(Sent {
                method: request.method,
                path: request.path,
                query: request.query,
                form: request.form,
                username: request.credentials.username.clone(),
            });
            Ok(ApiResponse {
                status: self.status,
                status_text: format!("{} canned", self.status),
                body: self.body.clone(),
            })
        }
    }

    fn client(status: u16, body: &str) -> MalClient<CannedTransport> {
        MalClient::with_transport(
            Credentials::new("spike", "swordfish"),
            CannedTransport::new(status, body),
        )
    }

    #[tokio::test]
    async fn test_verify_credentials() {
        let mal = client(200, "<user><id>4321</id><username>spike</username></user>");
        let user = mal.verify_credentials().await.unwrap();
        assert_eq!(user.id, 4321);
        assert_eq!(user.username, "spike");

        let sent = mal.transport.last();
        assert_eq!(sent.method, Method::Get);
        assert_eq!(sent.path, "/api/account/verify_credentials.xml");
        assert_eq!(sent.username, "spike");
    }

    #[tokio::test]
    async fn test_verify_no_content_is_auth_failure() {
        let mal = client(204, "");
        let err = mal.verify_credentials().await.unwrap_err();
        assert!(matches!(err, MalError::Auth { status: 204, .. }));
    }

    #[tokio::test]
    async fn test_verify_unauthorized() {
        let mal = client(401, "Invalid credentials");
        let err = mal.verify_credentials().await.unwrap_err();
        match err {
            MalError::Auth {
                status,
                status_text,
            } => {
                assert_eq!(status, 401);
                assert_eq!(status_text, "401 canned");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_search_sends_query() {
        let mal = client(
            200,
            "<anime><entry>\
             <id>20</id><title>Naruto</title><episodes>220</episodes>\
             </entry></anime>",
        );
        let results = mal.search("naruto").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Naruto");
        assert_eq!(results[0].episodes, 220);

        let sent = mal.transport.last();
        assert_eq!(sent.path, "/api/anime/search.xml");
        assert_eq!(sent.query, vec![("q", "naruto".to_string())]);
    }

    #[tokio::test]
    async fn test_search_without_entries_is_empty() {
        let mal = client(200, "<anime></anime>");
        assert!(mal.search("zzzz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_no_content() {
        let mal = client(204, "");
        assert!(matches!(
            mal.search("zzzz").await,
            Err(MalError::Auth { status: 204, .. })
        ));
    }

    #[tokio::test]
    async fn test_anime_list_query() {
        let mal = client(
            200,
            "<myanimelist><myinfo>\
             <user_id>4321</user_id><user_name>spike</user_name>\
             </myinfo></myanimelist>",
        );
        let list = mal.anime_list().await.unwrap();
        assert_eq!(list.username, "spike");

        let sent = mal.transport.last();
        assert_eq!(sent.path, "/malappinfo.php");
        assert_eq!(
            sent.query,
            vec![
                ("u", "spike".to_string()),
                ("status", "all".to_string()),
                ("type", "anime".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_anime_list_malformed() {
        let mal = client(200, "<html>maintenance</html>");
        assert!(matches!(
            mal.anime_list().await,
            Err(MalError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_add_entry_accepts_any_body() {
        let mal = client(201, "Created");
        let update = EntryUpdate {
            status: "watching".into(),
            episode: 1,
            tags: vec!["Cool".into(), "rad".into(), "awesome".into()],
            ..Default::default()
        };
        mal.add_entry(21, &update).await.unwrap();

        let sent = mal.transport.last();
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.path, "/api/animelist/add/21.xml");
        let form = sent.form.unwrap();
        assert_eq!(form.len(), 1);
        assert_eq!(form[0].0, "data");
        assert!(form[0].1.starts_with("<entry><episode>1</episode><status>watching</status>"));
        assert!(form[0].1.contains("<tags>Cool,rad,awesome</tags>"));
    }

    #[tokio::test]
    async fn test_add_entry_rejected() {
        let mal = client(400, "");
        assert!(matches!(
            mal.add_entry(21, &EntryUpdate::default()).await,
            Err(MalError::Auth { status: 400, .. })
        ));
    }

    #[tokio::test]
    async fn test_update_entry_acknowledged() {
        let mal = client(201, "Updated");
        mal.update_entry(21, &EntryUpdate::default()).await.unwrap();
        assert_eq!(mal.transport.last().path, "/api/animelist/update/21.xml");
    }

    #[tokio::test]
    async fn test_update_entry_wrong_acknowledgement() {
        let mal = client(200, "Failed");
        let err = mal
            .update_entry(21, &EntryUpdate::default())
            .await
            .unwrap_err();
        match err {
            MalError::UnexpectedAcknowledgement { expected, body } => {
                assert_eq!(expected, "Updated");
                assert_eq!(body, "Failed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_entry() {
        let mal = client(200, "Deleted");
        mal.delete_entry(21).await.unwrap();

        let sent = mal.transport.last();
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.path, "/api/animelist/delete/21.xml");
        assert!(sent.form.is_none());

        let mal = client(200, "Updated");
        assert!(matches!(
            mal.delete_entry(21).await,
            Err(MalError::UnexpectedAcknowledgement { expected: "Deleted", .. })
        ));
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let debug = format!("{:?}", Credentials::new("spike", "swordfish"));
        assert!(debug.contains("spike"));
        assert!(!debug.contains("swordfish"));
    }
}
