//! In-memory collaborators shared by the use case tests.

use async_trait::async_trait;
use chatgate_core::auth::{AuthError, AuthService};
use chatgate_core::chat::ChatService;
use chatgate_core::history::{HistoryRecord, HistoryStore, QaPair, RecordId, UserDirectory, UserId};
use chatgate_core::session::{Session, SessionStore};
use chatgate_core::{ChatGateError, Result};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Credential set kept in a map; login checks the password verbatim.
#[derive(Default)]
pub struct MockAuthService {
    users: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl AuthService for MockAuthService {
    async fn register(&self, email: &str, password: &str) -> Result<()> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(email) {
            return Err(AuthError::UserAlreadyExists.into());
        }
        users.insert(email.to_string(), password.to_string());
        Ok(())
    }

    async fn login(&self, email: &str, password: &str) -> Result<String> {
        let users = self.users.lock().unwrap();
        match users.get(email) {
            Some(stored) if stored == password => Ok(email.to_string()),
            _ => Err(AuthError::InvalidCredentials.into()),
        }
    }
}

#[derive(Default)]
pub struct MockSessionStore {
    pub session: Mutex<Option<Session>>,
    pub saves: Mutex<usize>,
}

impl MockSessionStore {
    pub fn current(&self) -> Option<Session> {
        self.session.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn load(&self) -> Result<Option<Session>> {
        Ok(self.current())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        *self.session.lock().unwrap() = Some(session.clone());
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.session.lock().unwrap() = None;
        Ok(())
    }
}

/// Chat service answering from a queue of scripted replies.
#[derive(Default)]
pub struct ScriptedChat {
    replies: Mutex<VecDeque<Result<String>>>,
    pub prompts: Mutex<Vec<String>>,
    hang: bool,
}

impl ScriptedChat {
    pub fn new(replies: impl IntoIterator<Item = Result<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
            hang: false,
        }
    }

    /// A service that records the prompt and never answers.
    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::default()
        }
    }

    pub fn replying(replies: &[&str]) -> Self {
        Self::new(replies.iter().map(|r| Ok(r.to_string())))
    }
}

#[async_trait]
impl ChatService for ScriptedChat {
    async fn chat(&self, prompt: &str, _user: Option<UserId>) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.hang {
            std::future::pending::<()>().await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ChatGateError::network("no scripted reply")))
    }
}

/// History store and user directory held in memory.
#[derive(Default)]
pub struct MemoryHistory {
    pub records: Mutex<Vec<HistoryRecord>>,
    pub users: Mutex<HashMap<String, UserId>>,
    pub fail_writes: Mutex<bool>,
    pub updates: Mutex<usize>,
    next_id: Mutex<i64>,
}

impl MemoryHistory {
    pub fn with_user(email: &str, user: UserId) -> Self {
        let history = Self::default();
        history.users.lock().unwrap().insert(email.to_string(), user);
        history
    }

    pub fn seed(&self, question: &str, answer: &str) -> RecordId {
        let id = self.allocate();
        self.records.lock().unwrap().push(HistoryRecord {
            id,
            question: question.to_string(),
            answer: answer.to_string(),
            timestamp: None,
        });
        id
    }

    pub fn pairs(&self) -> Vec<(String, String)> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|r| (r.question.clone(), r.answer.clone()))
            .collect()
    }

    fn allocate(&self) -> RecordId {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        RecordId(*next)
    }

    fn check_writable(&self) -> Result<()> {
        if *self.fail_writes.lock().unwrap() {
            Err(ChatGateError::service(500, "write rejected"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl UserDirectory for MemoryHistory {
    async fn lookup(&self, email: &str) -> Result<UserId> {
        self.users
            .lock()
            .unwrap()
            .get(email)
            .copied()
            .ok_or_else(|| ChatGateError::not_found("user", email))
    }
}

#[async_trait]
impl HistoryStore for MemoryHistory {
    async fn load(&self, _user: UserId) -> Result<Vec<HistoryRecord>> {
        Ok(self.records.lock().unwrap().clone())
    }

    async fn append(&self, _user: UserId, pair: &QaPair) -> Result<HistoryRecord> {
        self.check_writable()?;
        let record = HistoryRecord {
            id: self.allocate(),
            question: pair.question.clone(),
            answer: pair.answer.clone(),
            timestamp: None,
        };
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update(&self, record: RecordId, pair: &QaPair) -> Result<()> {
        *self.updates.lock().unwrap() += 1;
        self.check_writable()?;
        let mut records = self.records.lock().unwrap();
        let stored = records
            .iter_mut()
            .find(|r| r.id == record)
            .ok_or_else(|| ChatGateError::service(404, "Message not found"))?;
        stored.question = pair.question.clone();
        stored.answer = pair.answer.clone();
        Ok(())
    }

    async fn clear(&self, _user: UserId) -> Result<()> {
        self.check_writable()?;
        self.records.lock().unwrap().clear();
        Ok(())
    }
}
