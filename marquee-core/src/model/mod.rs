mod command;
mod participant;
mod screen;
mod signaling;
mod status;

pub use command::ScreenCommand;
pub use participant::{ParticipantId, Role};
pub use screen::{ContentDescriptor, ContentKind, ParseScreenIdError, Screen, ScreenId};
pub use signaling::SignalMessage;
pub use status::StatusUpdate;
