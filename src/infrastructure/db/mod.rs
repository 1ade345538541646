use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Client, ClientSession, Collection, Database, IndexModel};

use crate::application::ports::health_port::HealthPort;
use crate::bootstrap::config::{Config, TransactionMode};

pub mod documents;
#[cfg(test)]
pub mod memory;
pub mod repositories;

use documents::{BlogDocument, CommentDocument, UserDocument};

/// Runs a driver action inside the session when one is open.
macro_rules! in_session {
    ($action:expr, $session:expr) => {
        match $session.as_mut() {
            Some(s) => $action.session(s).await,
            None => $action.await,
        }
    };
}
pub(crate) use in_session;

/// Shared handles for the three collections. Cheap to clone; the driver
/// pools connections behind `Client`.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    db: Database,
    pub(crate) users: Collection<UserDocument>,
    pub(crate) blogs: Collection<BlogDocument>,
    pub(crate) comments: Collection<CommentDocument>,
    transactions: bool,
}

pub async fn connect(cfg: &Config) -> anyhow::Result<MongoStore> {
    let client = Client::with_uri_str(&cfg.database_url).await?;
    let db = client.database(&cfg.database_name);
    tokio::time::timeout(cfg.request_timeout, async {
        db.run_command(doc! { "ping": 1 }).await
    })
    .await
    .map_err(|_| anyhow::anyhow!("timed out connecting to the database"))??;

    let transactions = match cfg.transactions {
        TransactionMode::On => true,
        TransactionMode::Off => false,
        TransactionMode::Auto => supports_transactions(&db).await,
    };
    tracing::info!(database = %cfg.database_name, transactions, "database_connected");

    let store = MongoStore {
        users: db.collection("users"),
        blogs: db.collection("blogs"),
        comments: db.collection("comments"),
        client,
        db,
        transactions,
    };
    store.ensure_indexes().await;
    Ok(store)
}

// Multi-document transactions need a replica set member or a mongos router.
async fn supports_transactions(db: &Database) -> bool {
    match db.run_command(doc! { "hello": 1 }).await {
        Ok(reply) => {
            reply.contains_key("setName") || matches!(reply.get_str("msg"), Ok("isdbgrid"))
        }
        Err(e) => {
            tracing::warn!(error = ?e, "hello_command_failed");
            false
        }
    }
}

impl MongoStore {
    async fn ensure_indexes(&self) {
        let unique_email = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        if let Err(e) = self.users.create_index(unique_email).await {
            // Existing duplicates block the index; the pre-insert lookup still applies.
            tracing::warn!(error = ?e, "users_email_index_failed");
        }
        let by_author = IndexModel::builder().keys(doc! { "author": 1 }).build();
        if let Err(e) = self.blogs.create_index(by_author).await {
            tracing::warn!(error = ?e, "blogs_author_index_failed");
        }
        let by_comment = IndexModel::builder().keys(doc! { "comments": 1 }).build();
        if let Err(e) = self.blogs.create_index(by_comment).await {
            tracing::warn!(error = ?e, "blogs_comments_index_failed");
        }
    }

    /// Opens a session with a started transaction, or `None` when the
    /// deployment cannot run transactions.
    pub(crate) async fn begin(&self) -> anyhow::Result<Option<ClientSession>> {
        if !self.transactions {
            return Ok(None);
        }
        let mut session = self.client.start_session().await?;
        session.start_transaction().await?;
        Ok(Some(session))
    }

    pub(crate) async fn commit(&self, session: Option<ClientSession>) -> anyhow::Result<()> {
        if let Some(mut s) = session {
            s.commit_transaction().await?;
        }
        Ok(())
    }

    pub(crate) fn transactional(&self) -> bool {
        self.transactions
    }
}

#[async_trait]
impl HealthPort for MongoStore {
    async fn ping(&self) -> anyhow::Result<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
