use std::sync::Arc;

use crate::resolver::MusicResolver;

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<dyn MusicResolver>,
}

impl AppState {
    pub fn new(resolver: Arc<dyn MusicResolver>) -> Self {
        Self { resolver }
    }
}
