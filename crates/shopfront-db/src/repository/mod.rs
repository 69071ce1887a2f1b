//! # Repository Module
//!
//! SQL for the cart lives here and nowhere else.
//!
//! ```text
//! CartState
//!      │  db.checkout().add(7)
//!      ▼
//! CheckoutRepository
//! ├── list_all / count / get_by_item_id   (reads)
//! └── add / increase / decrease / remove / clear
//!          (mutation + full re-read in one transaction)
//!      │
//!      ▼
//! SQLite `checkout` table
//! ```
//!
//! - [`CheckoutRepository`](checkout::CheckoutRepository) - Cart rows

pub mod checkout;
