mod envelope;
mod payload;

pub use envelope::{Envelope, ErrorCode, ErrorPayload};
pub use payload::{
    ChatPayload, GameActionPayload, JoinPayload, JoinResult, KickPlayerPayload, MuckShowPayload,
    RebuyPayload, SitPayload, UpdateConfigPayload,
};
