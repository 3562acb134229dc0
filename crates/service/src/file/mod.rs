pub mod credentials_store;
