//! # Object Graph Validation
//!
//! Walks an object graph with the [`traversal`] engine and collects every
//! problem its nodes report into one [`ValidationOutcome`], each reason
//! located by the path of the node that raised it.
//!
//! ## Failure Tiers
//!
//! - **Argument failures**: missing root or a leaf node type. Reported
//!   before anything runs.
//! - **Invalid objects**: hooks record reasons; validation continues unless
//!   `stop_on_first_error` is set.
//! - **Broken hooks**: a hook returning `Err` stops the run. The caller gets
//!   [`ValidationError::InvalidOperation`], never a plain "invalid".
//!
//! ## Quick Start
//!
//! ```rust
//! use once_cell::sync::Lazy;
//! use std::rc::Rc;
//! use traversal::{GraphNode, MemberInfo, MemberValue, NodeId, Shape, TypeInfo};
//! use validation::{HookFlow, HookResult, Validatable, ValidationOutcome};
//!
//! struct Mailbox {
//!     address: String,
//! }
//!
//! #[derive(Clone)]
//! struct Node(Rc<Mailbox>);
//!
//! static MAILBOX: Lazy<TypeInfo> =
//!     Lazy::new(|| TypeInfo::of::<Mailbox>().property("Address", Shape::leaf::<String>()));
//!
//! impl GraphNode for Node {
//!     fn node_id(&self) -> NodeId {
//!         NodeId::of_rc(&self.0)
//!     }
//!
//!     fn type_info(&self) -> &'static TypeInfo {
//!         &MAILBOX
//!     }
//!
//!     fn member_value(&self, _member: &MemberInfo) -> MemberValue<Self> {
//!         MemberValue::Absent
//!     }
//! }
//!
//! impl Validatable for Node {
//!     fn pre_structure_validation(&self, outcome: &mut ValidationOutcome) -> HookResult {
//!         outcome.invalidate_if_not(self.0.address.contains('@'), Some("Address"), "lacks a domain");
//!         Ok(HookFlow::Continue)
//!     }
//! }
//!
//! let mailbox = Node(Rc::new(Mailbox { address: "postmaster".into() }));
//! let outcome = validation::validate(Some(&mailbox), None).unwrap();
//!
//! assert!(!outcome.is_valid());
//! assert_eq!(outcome.to_string(), "Invalid Mailbox: Address: lacks a domain");
//! ```

pub mod api;
pub mod error;
pub mod hooks;
pub mod outcome;
mod particles;
pub mod time_span;
pub mod visitor;

pub use api::{
    ensure_valid, try_validate, try_validate_and_update, validate, validate_and_update,
    ValidationReport, Validator,
};
pub use error::{ValidationError, ValidationResult};
pub use hooks::{HookFlow, HookResult, Validatable, ValidatableAndUpdatable};
pub use outcome::{Reason, Severity, ValidationOutcome};
pub use time_span::{format_time_span, parse_time_span, TimeSpanBound};
pub use visitor::{HookFailure, ValidationVisitor};

// Settings are part of the validation API surface
pub use traversal_config::ValidationSettings;
