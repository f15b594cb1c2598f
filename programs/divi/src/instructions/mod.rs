//! # Instructions Module
//!
//! ## Available Instructions:
//!
//! | Instruction | Mode | Who Can Call | Description |
//! |-------------|------|--------------|-------------|
//! | `initialize_vault` | both | Issuer | Open a vault for `(issuer, payment_id)` |
//! | `pay` | pooled | Anyone | Pay into the shared custody account |
//! | `close_vault` | pooled | Issuer | Collect a finalized vault and close it |
//! | `participate` | tracked | Anyone | Contribute through a participation record |
//! | `cancel_payment` | tracked | Issuer | Stop an open vault once everyone is refunded |
//! | `refund_participant` | tracked | Issuer | Give one contribution back |
//! | `settle_participant` | tracked | Issuer | Collect one contribution of a finalized vault |
//! | `close_payment_vault` | tracked | Issuer | Close a vault with no participation left |
//!
//! ## Instruction Flow:
//!
//! ```text
//! Pooled:   initialize_vault ──> pay × N (exact fill) ──> close_vault
//!
//! Tracked:  initialize_vault ──> participate × N ─┬─> (exact fill) settle_participant × N ──┐
//!                                                 │                                          ├─> close_payment_vault
//!                                                 └─> refund_participant × N ──> cancel_payment ┘
//! ```

pub mod cancel_payment;
pub mod close_payment_vault;
pub mod close_vault;
pub mod initialize_vault;
pub mod participate;
pub mod pay;
pub mod refund_participant;
pub mod settle_participant;

pub use cancel_payment::*;
pub use close_payment_vault::*;
pub use close_vault::*;
pub use initialize_vault::*;
pub use participate::*;
pub use pay::*;
pub use refund_participant::*;
pub use settle_participant::*;
