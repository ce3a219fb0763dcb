pub mod submission;

#[cfg_attr(feature = "mock", mockall::automock(type Connection = MockConnection;))]
pub trait Database: Send + Sync + 'static {
    type Connection: Send + Sync + 'static;

    /// Opens a connection which can be used to interact with the datastore.
    ///
    /// Fails immediately, without any network activity, if the connection
    /// settings are incomplete.
    fn connect(&self) -> anyhow::Result<Self::Connection>;
}

#[cfg(feature = "mock")]
#[derive(Debug)]
pub struct MockConnection;

#[cfg(feature = "mock")]
impl MockDatabase {
    pub fn build(connects: bool) -> Self {
        let mut db = Self::new();
        db.expect_connect().once().return_once(move || {
            if connects {
                Ok(MockConnection)
            } else {
                Err(anyhow::anyhow!("Missing datastore configuration"))
            }
        });
        db
    }
}
