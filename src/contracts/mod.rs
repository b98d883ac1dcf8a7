//! Contract bindings and wrappers for the Teleporter protocol
//!
//! Each module pairs an inline ABI definition with a thin wrapper that
//! creates transaction requests and runs view calls. The wrappers never
//! sign or send anything themselves; callers submit the returned
//! `TransactionRequest`s through whatever signer setup they run.

pub mod native_token_destination;
pub mod native_token_source;
pub mod teleporter_messenger;
pub mod teleporter_registry;
pub mod warp_messenger;

pub use native_token_destination::{NativeTokenDestination, NativeTokenDestinationContract};
pub use native_token_source::{NativeTokenSource, NativeTokenSourceContract};
pub use teleporter_messenger::{TeleporterMessenger, TeleporterMessengerContract};
pub use teleporter_registry::{TeleporterRegistry, TeleporterRegistryContract};
pub use warp_messenger::{WarpMessenger, WarpMessengerContract};
