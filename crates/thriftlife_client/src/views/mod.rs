//! crates/thriftlife_client/src/views/mod.rs
//!
//! Page view models. Each page reduces user messages into state with a pure
//! `update`, and hands the network round-trip it asks for to `run`. The
//! outcome comes back as another message.

pub mod admin;
pub mod impact;
pub mod intake;
pub mod shop;
pub mod tracking;

pub use admin::{AdminEffect, AdminMsg, AdminView};
pub use impact::ImpactView;
pub use intake::{IntakeEffect, IntakeField, IntakeMsg, IntakeView};
pub use shop::{ShopEffect, ShopMsg, ShopView};
pub use tracking::{TrackingEffect, TrackingMsg, TrackingView};

use async_trait::async_trait;
use thriftlife_core::ports::ThriftBackend;

use crate::error::ClientError;

//=========================================================================================
// Notifications
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A transient notification shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(error: &ClientError) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: error.user_message(),
        }
    }
}

/// Notices raised since the renderer last drained them.
#[derive(Debug, Default)]
pub struct Notices(Vec<Notice>);

impl Notices {
    pub fn push(&mut self, notice: Notice) {
        self.0.push(notice);
    }

    pub fn fail(&mut self, error: &ClientError) {
        tracing::warn!("{}", error);
        self.0.push(Notice::error(error));
    }

    pub fn pending(&self) -> &[Notice] {
        &self.0
    }

    pub fn take(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.0)
    }
}

//=========================================================================================
// The View Contract
//=========================================================================================

#[async_trait]
pub trait View: Send {
    type Msg: Send;
    type Effect: Send;

    /// Applies a message to the page state, returning the round-trip it needs, if any.
    fn update(&mut self, msg: Self::Msg) -> Option<Self::Effect>;

    /// Performs an effect against the backend and reports the outcome.
    async fn run(backend: &dyn ThriftBackend, effect: Self::Effect) -> Self::Msg;

    /// Feeds a message through `update` and `run` until the page settles.
    async fn dispatch(&mut self, backend: &dyn ThriftBackend, msg: Self::Msg) {
        let mut next = self.update(msg);
        while let Some(effect) = next {
            let outcome = Self::run(backend, effect).await;
            next = self.update(outcome);
        }
    }
}
