//! Shared test doubles and app assembly for the API surface tests.
//!
//! The doubles replace only the process-external collaborators (identity
//! provider, PostgreSQL); everything between the HTTP surface and the
//! ports is the production code path.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use backend::domain::ports::{
    AllowListPersistenceError, AllowListRepository, HistoryPersistenceError, HistoryRepository,
    IdentityVerificationError, IdentityVerifier,
};
use backend::domain::{
    AllowListRegistry, AllowedUser, ClockedHistoryService, DateRange, EmailAddress, HistoryRecord,
    RecordKey, VerifiedIdentity, VerifierLoginService,
};
use backend::inbound::http::state::{AppSettings, HttpState};
use backend::server::stage_scope;

pub const ADMIN_EMAIL: &str = "admin@example.com";

/// Deterministic "now" for every test: 2024-02-01T12:00:00Z.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Verifier double mapping opaque tokens to identities.
///
/// Tokens of the form `token-for:<email>` verify as that email with the
/// display name "Test User"; anything else is an invalid credential.
pub struct StaticVerifier;

#[async_trait]
impl IdentityVerifier for StaticVerifier {
    async fn verify(
        &self,
        credential: &str,
    ) -> Result<VerifiedIdentity, IdentityVerificationError> {
        let email = credential
            .strip_prefix("token-for:")
            .ok_or_else(|| IdentityVerificationError::invalid_token("unknown credential"))?;
        Ok(VerifiedIdentity {
            email: EmailAddress::new(email)
                .map_err(|err| IdentityVerificationError::invalid_token(err.to_string()))?,
            name: "Test User".to_owned(),
        })
    }
}

/// In-memory allow-list with store semantics (idempotent upsert/delete).
#[derive(Default)]
pub struct InMemoryAllowList {
    emails: Mutex<BTreeSet<String>>,
}

#[async_trait]
impl AllowListRepository for InMemoryAllowList {
    async fn upsert(&self, email: &EmailAddress) -> Result<(), AllowListPersistenceError> {
        self.emails
            .lock()
            .expect("emails lock")
            .insert(email.as_ref().to_owned());
        Ok(())
    }

    async fn contains(&self, email: &EmailAddress) -> Result<bool, AllowListPersistenceError> {
        Ok(self
            .emails
            .lock()
            .expect("emails lock")
            .contains(email.as_ref()))
    }

    async fn delete(&self, email: &EmailAddress) -> Result<(), AllowListPersistenceError> {
        self.emails
            .lock()
            .expect("emails lock")
            .remove(email.as_ref());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<AllowedUser>, AllowListPersistenceError> {
        Ok(self
            .emails
            .lock()
            .expect("emails lock")
            .iter()
            .map(|email| AllowedUser {
                email: EmailAddress::new(email).expect("stored email is valid"),
            })
            .collect())
    }
}

/// In-memory history store keyed by (id, created_at, owner).
#[derive(Default)]
pub struct InMemoryHistoryRepository {
    records: Mutex<Vec<HistoryRecord>>,
}

fn is_match(record: &HistoryRecord, owner: &EmailAddress, key: &RecordKey) -> bool {
    record.id == key.id && record.created_at == key.created_at && &record.user_id == owner
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn insert(&self, record: &HistoryRecord) -> Result<(), HistoryPersistenceError> {
        self.records
            .lock()
            .expect("records lock")
            .push(record.clone());
        Ok(())
    }

    async fn update_fields(
        &self,
        owner: &EmailAddress,
        key: &RecordKey,
        name: &str,
        description: &str,
    ) -> Result<HistoryRecord, HistoryPersistenceError> {
        let mut records = self.records.lock().expect("records lock");
        let record = records
            .iter_mut()
            .find(|record| is_match(record, owner, key))
            .ok_or(HistoryPersistenceError::NotFound)?;
        record.name = name.to_owned();
        record.description = description.to_owned();
        Ok(record.clone())
    }

    async fn delete(
        &self,
        owner: &EmailAddress,
        key: &RecordKey,
    ) -> Result<(), HistoryPersistenceError> {
        self.records
            .lock()
            .expect("records lock")
            .retain(|record| !is_match(record, owner, key));
        Ok(())
    }

    async fn list_in_range(
        &self,
        owner: &EmailAddress,
        range: &DateRange,
    ) -> Result<Vec<HistoryRecord>, HistoryPersistenceError> {
        let mut matched: Vec<HistoryRecord> = self
            .records
            .lock()
            .expect("records lock")
            .iter()
            .filter(|record| &record.user_id == owner && range.contains(record.created_at))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn scan_owner(
        &self,
        owner: &EmailAddress,
    ) -> Result<Vec<HistoryRecord>, HistoryPersistenceError> {
        Ok(self
            .records
            .lock()
            .expect("records lock")
            .iter()
            .filter(|record| &record.user_id == owner)
            .cloned()
            .collect())
    }
}

/// Production services over the in-memory doubles.
pub fn app_state() -> (HttpState, AppSettings) {
    let admin = EmailAddress::new(ADMIN_EMAIL).expect("valid admin email");
    let allow_list = Arc::new(InMemoryAllowList::default());
    let history_repository = Arc::new(InMemoryHistoryRepository::default());

    let state = HttpState {
        login: Arc::new(VerifierLoginService::new(
            Arc::new(StaticVerifier),
            allow_list.clone(),
            admin.clone(),
        )),
        registry: Arc::new(AllowListRegistry::new(allow_list, admin.clone())),
        history: Arc::new(ClockedHistoryService::new(
            history_repository,
            Arc::new(FixedClock(fixed_now())),
        )),
    };
    let settings = AppSettings::new(admin, "test-client-id", "");
    (state, settings)
}

fn session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Assemble the production routing table over the in-memory doubles.
pub async fn spawn_app() -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>
{
    let (state, settings) = app_state();
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(web::Data::new(settings))
            .service(stage_scope("").wrap(session_middleware())),
    )
    .await
}

/// Log in through the real endpoint and return the session cookie.
pub async fn login_as(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    email: &str,
) -> Cookie<'static> {
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/login")
            .set_json(serde_json::json!({ "credential": format!("token-for:{email}") }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK, "login should succeed");
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// Allow-list an email through the admin API.
pub async fn allow_email(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    admin_cookie: &Cookie<'static>,
    email: &str,
) {
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/users")
            .cookie(admin_cookie.clone())
            .set_json(serde_json::json!({ "email": email }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK, "allow-listing should succeed");
}
