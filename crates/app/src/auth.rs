//! Auth
//!
//! Demo authentication: a hard-coded credential check against the demo
//! accounts, with the original's generic fallbacks, plus registration with
//! role detection from the email address. There is no credential store.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Store administrator.
    Admin,

    /// Shopper.
    Customer,

    /// Point-of-sale cashier.
    Cashier,
}

impl Role {
    /// Role name as stored and displayed.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Customer => "customer",
            Self::Cashier => "cashier",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A logged-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User id.
    pub id: String,

    /// Login email.
    pub email: String,

    /// Display name.
    pub name: String,

    /// Role.
    pub role: Role,

    /// Tax id, for customers that provided one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nit: Option<String>,
}

/// Errors from the demo credential check.
#[derive(Debug, Error, PartialEq)]
pub enum AuthError {
    /// No demo rule matched; the message lists the demo credentials, as the
    /// original prototype did.
    #[error(
        "Credenciales incorrectas. Use:\n\
         Admin: admin@adventureworks.com / admin123\n\
         Cajera: cajera@adventureworks.com / cajera123\n\
         Cliente: cliente@ejemplo.com / cliente123"
    )]
    InvalidCredentials,
}

fn demo_admin() -> User {
    User {
        id: "admin-1".to_string(),
        email: "admin@adventureworks.com".to_string(),
        name: "Administrador Sistema".to_string(),
        role: Role::Admin,
        nit: None,
    }
}

fn demo_customer() -> User {
    User {
        id: "customer-1".to_string(),
        email: "cliente@ejemplo.com".to_string(),
        name: "Juan Pérez".to_string(),
        role: Role::Customer,
        nit: Some("1234567-8".to_string()),
    }
}

fn demo_cashier() -> User {
    User {
        id: "cashier-1".to_string(),
        email: "cajera@adventureworks.com".to_string(),
        name: "María González".to_string(),
        role: Role::Cashier,
        nit: None,
    }
}

/// Checks a login against the demo accounts.
///
/// Exact demo credentials win; otherwise the generic fallbacks apply: any
/// `admin` mailbox with the admin password, any `cajera` mailbox with the
/// cashier password, and any email with the customer password.
///
/// # Errors
///
/// Returns [`AuthError::InvalidCredentials`] when no rule matches.
pub fn login(email: &str, password: &str) -> Result<User, AuthError> {
    if email == "admin@adventureworks.com" && password == "admin123" {
        return Ok(demo_admin());
    }

    if email == "cajera@adventureworks.com" && password == "cajera123" {
        return Ok(demo_cashier());
    }

    if email == "cliente@ejemplo.com" && password == "cliente123" {
        return Ok(demo_customer());
    }

    if email.contains("admin") && password == "admin123" {
        return Ok(User {
            email: email.to_string(),
            name: "Administrador".to_string(),
            ..demo_admin()
        });
    }

    if email.contains("cajera") && password == "cajera123" {
        return Ok(User {
            email: email.to_string(),
            name: "Cajera".to_string(),
            ..demo_cashier()
        });
    }

    if password == "cliente123" {
        let mailbox = email.split('@').next().unwrap_or(email);

        return Ok(User {
            email: email.to_string(),
            name: mailbox.to_string(),
            ..demo_customer()
        });
    }

    Err(AuthError::InvalidCredentials)
}

/// Detects the role a registration email implies.
#[must_use]
pub fn detect_role(email: &str) -> Role {
    if email.contains("admin") || email.contains("administrador") {
        Role::Admin
    } else if email.contains("cajera") || email.contains("cashier") {
        Role::Cashier
    } else {
        Role::Customer
    }
}

/// Registers a new user. The role comes from the email address; only
/// customers keep a tax id.
#[must_use]
pub fn register(name: &str, email: &str, nit: Option<&str>, now_millis: i64) -> User {
    let role = detect_role(email);
    let nit = match role {
        Role::Customer => nit.map(ToString::to_string),
        Role::Admin | Role::Cashier => None,
    };

    User {
        id: now_millis.to_string(),
        email: email.to_string(),
        name: name.to_string(),
        role,
        nit,
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn exact_demo_credentials_log_in() -> TestResult {
        let admin = login("admin@adventureworks.com", "admin123")?;
        let cashier = login("cajera@adventureworks.com", "cajera123")?;
        let customer = login("cliente@ejemplo.com", "cliente123")?;

        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.name, "Administrador Sistema");
        assert_eq!(cashier.role, Role::Cashier);
        assert_eq!(customer.role, Role::Customer);
        assert_eq!(customer.nit.as_deref(), Some("1234567-8"));

        Ok(())
    }

    #[test]
    fn generic_admin_mailbox_works_with_admin_password() -> TestResult {
        let user = login("admin@otrotienda.sv", "admin123")?;

        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.email, "admin@otrotienda.sv");
        assert_eq!(user.name, "Administrador");

        Ok(())
    }

    #[test]
    fn customer_password_logs_any_email_in() -> TestResult {
        let user = login("ana@ejemplo.com", "cliente123")?;

        assert_eq!(user.role, Role::Customer);
        assert_eq!(user.name, "ana", "name comes from the mailbox");

        Ok(())
    }

    #[test]
    fn wrong_password_lists_demo_credentials() {
        let error = login("cliente@ejemplo.com", "nope");

        assert_eq!(error, Err(AuthError::InvalidCredentials));
        assert!(
            AuthError::InvalidCredentials
                .to_string()
                .contains("admin@adventureworks.com / admin123"),
            "the error must teach the demo credentials"
        );
    }

    #[test]
    fn register_detects_role_from_email() {
        assert_eq!(detect_role("admin@tienda.sv"), Role::Admin);
        assert_eq!(detect_role("cashier@tienda.sv"), Role::Cashier);
        assert_eq!(detect_role("ana@tienda.sv"), Role::Customer);
    }

    #[test]
    fn register_keeps_nit_only_for_customers() {
        let customer = register("Ana", "ana@tienda.sv", Some("9999999-1"), 1);
        let admin = register("Root", "admin@tienda.sv", Some("9999999-1"), 2);

        assert_eq!(customer.nit.as_deref(), Some("9999999-1"));
        assert_eq!(admin.nit, None);
        assert_eq!(customer.id, "1");
    }

    #[test]
    fn user_serde_matches_original_shape() -> TestResult {
        let json = serde_json::to_string(&demo_customer())?;

        assert!(json.contains("\"role\":\"customer\""), "json was: {json}");
        assert!(json.contains("\"nit\":\"1234567-8\""), "json was: {json}");

        let admin_json = serde_json::to_string(&demo_admin())?;

        assert!(
            !admin_json.contains("nit"),
            "absent nit must not serialize: {admin_json}"
        );

        Ok(())
    }
}
