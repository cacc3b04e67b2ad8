// src/models/health.rs

use serde::Serialize;
use utoipa::ToSchema;

/// Estado de la conexión con el document store.
/// Los códigos siguen la convención 0..3 que ya consume el front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected = 0,
    Connected = 1,
    Connecting = 2,
    Disconnecting = 3,
}

impl ConnectionState {
    pub fn code(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthStatus {
    pub ok: bool,
    #[serde(rename = "mongoState")]
    #[schema(example = 1)]
    pub mongo_state: u8,
}

impl From<ConnectionState> for HealthStatus {
    fn from(state: ConnectionState) -> Self {
        Self {
            ok: state == ConnectionState::Connected,
            mongo_state: state.code(),
        }
    }
}
