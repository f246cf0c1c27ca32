pub mod root;
pub mod stream;
pub use root::RootController;
pub use stream::StreamController;
