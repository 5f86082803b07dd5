//! # Session State
//!
//! Per-client login state: who is logged in and which sidebar view they
//! are on. The server keeps one of these per session cookie.
//!
//! ```text
//!   login ──► Session { role, view: Venta }
//!               │
//!               ├── navigate(Venta)    ──► sale form
//!               ├── navigate(Monitor)  ──► report (Admin) / restricted (Barbero)
//!               │
//!   logout ◄────┘  (session dropped)
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::Role;

/// Sidebar destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// "Nueva Venta": the sale entry form.
    #[default]
    Venta,
    /// "Monitor Dueño": the daily report.
    Monitor,
}

/// State of one logged-in client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Session {
    pub role: Role,
    pub view: View,
}

impl Session {
    /// A fresh session lands on the sale form.
    pub fn new(role: Role) -> Self {
        Session {
            role,
            view: View::default(),
        }
    }

    /// Switches the current view. Navigation itself is never refused; the
    /// restriction applies when the view is rendered.
    pub fn navigate(&mut self, view: View) {
        self.view = view;
    }

    /// Sidebar greeting line.
    pub fn greeting(&self) -> String {
        format!("Hola, {}", self.role)
    }

    /// Gate for the owner monitor.
    pub fn require_admin(&self) -> CoreResult<()> {
        if self.role.is_admin() {
            Ok(())
        } else {
            Err(CoreError::AdminOnly)
        }
    }
}
