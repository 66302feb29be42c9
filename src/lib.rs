pub mod clarity;

// 重新导出常用类型和函数，方便外部使用
pub use clarity::{
    api::{LocalApi, SyncApi},
    app::ClarityApp,
    config::{AppConfig, IdentityConfig},
    device::{get_device_id, sync_status, Connectivity, NetworkStatus, SyncStatus},
    http::{ClientError, ClientListener, ClientRegistry, TokenProvider},
    storage::{LocalStorage, MemoryStorage, SqliteStorage},
    store::{Notebook, NotebookId, User, UserStore},
};
