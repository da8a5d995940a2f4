//! Payloads gitlab pushes to the integrating application
//!
//! cf <https://docs.gitlab.com/user/project/integrations/webhook_events/>

pub mod push_event;

pub use push_event::PushEvent;
