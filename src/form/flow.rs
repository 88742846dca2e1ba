use std::fmt;
use std::str::FromStr;

use crate::error::FormError;

// ============================================================================
// Roles
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Client,
    Freelancer,
    Admin,
}

impl Role {
    /// Label used by the auth API and stored under `userRole`.
    pub fn as_label(&self) -> &'static str {
        match self {
            Role::Client => "CLIENT",
            Role::Freelancer => "FREELANCER",
            Role::Admin => "ADMIN",
        }
    }

    pub fn dashboard_route(&self) -> &'static str {
        match self {
            Role::Client => "/client-dashboard",
            Role::Freelancer => "/freelancer-dashboard",
            Role::Admin => "/admin-dashboard",
        }
    }

    pub fn login_route(&self) -> &'static str {
        match self {
            Role::Client => "/login",
            Role::Freelancer => "/freelancer-login",
            Role::Admin => "/admin-login",
        }
    }
}

impl FromStr for Role {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CLIENT" => Ok(Role::Client),
            "FREELANCER" => Ok(Role::Freelancer),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(FormError::UnknownRole(s.to_string())),
        }
    }
}

// ============================================================================
// Field specs
// ============================================================================

/// Declared input type of a field. Decides how change events are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Toggle,
}

/// Validation rule attached to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Trimmed value must be non-empty
    Required(&'static str),
    Email,
    /// Required, with an optional minimum character count
    Password { min_len: Option<usize> },
    ConfirmPassword,
    Skills { min_distinct: usize },
    /// Optional; if present must start with http:// or https://
    OptionalUrl,
    MustAgree,
    /// No validation (bio, remember-me)
    Unchecked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub rule: FieldRule,
    /// Whether the field is part of the request body
    pub sent: bool,
}

const fn text(name: &'static str, rule: FieldRule) -> FieldSpec {
    FieldSpec { name, kind: FieldKind::Text, rule, sent: true }
}

const fn toggle(name: &'static str, rule: FieldRule, sent: bool) -> FieldSpec {
    FieldSpec { name, kind: FieldKind::Toggle, rule, sent }
}

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_SKILLS: usize = 3;

const LOGIN_FIELDS: &[FieldSpec] = &[
    text("email", FieldRule::Email),
    text("password", FieldRule::Password { min_len: None }),
    toggle("rememberMe", FieldRule::Unchecked, false),
];

const CLIENT_REGISTRATION_FIELDS: &[FieldSpec] = &[
    text("fullName", FieldRule::Required("Full name is required")),
    text("email", FieldRule::Email),
    text("password", FieldRule::Password { min_len: Some(MIN_PASSWORD_LEN) }),
    text("companyName", FieldRule::Required("Company name is required")),
    text("phoneNumber", FieldRule::Required("Phone number is required")),
    toggle("agreedToTerms", FieldRule::MustAgree, true),
];

const FREELANCER_REGISTRATION_FIELDS: &[FieldSpec] = &[
    text("fullName", FieldRule::Required("Full name is required")),
    text("email", FieldRule::Email),
    text("password", FieldRule::Password { min_len: Some(MIN_PASSWORD_LEN) }),
    FieldSpec {
        name: "confirmPassword",
        kind: FieldKind::Text,
        rule: FieldRule::ConfirmPassword,
        sent: false,
    },
    text("professionalTitle", FieldRule::Required("Professional title is required")),
    text("phoneNumber", FieldRule::Required("Phone number is required")),
    text("skills", FieldRule::Skills { min_distinct: MIN_SKILLS }),
    text("portfolioUrl", FieldRule::OptionalUrl),
    text("bio", FieldRule::Unchecked),
    toggle("agreedToTerms", FieldRule::MustAgree, true),
];

const ADMIN_REGISTRATION_FIELDS: &[FieldSpec] = &[
    text("fullName", FieldRule::Required("Full name is required")),
    text("email", FieldRule::Email),
    text("password", FieldRule::Password { min_len: Some(MIN_PASSWORD_LEN) }),
    FieldSpec {
        name: "confirmPassword",
        kind: FieldKind::Text,
        rule: FieldRule::ConfirmPassword,
        sent: false,
    },
    text("adminCode", FieldRule::Required("Admin registration code is required")),
    text("department", FieldRule::Required("Department is required")),
    toggle("agreedToTerms", FieldRule::MustAgree, true),
];

// ============================================================================
// Flows
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flow {
    ClientLogin,
    ClientRegistration,
    FreelancerLogin,
    FreelancerRegistration,
    AdminLogin,
    AdminRegistration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    Login,
    Registration,
}

/// Everything that differs between the six onboarding pages.
#[derive(Debug)]
pub struct FlowDescriptor {
    pub flow: Flow,
    pub role: Role,
    pub kind: FlowKind,
    pub fields: &'static [FieldSpec],
    pub endpoint: &'static str,
    /// Shown under `submit` when the server rejects without a message
    pub failure_message: &'static str,
    /// Shown under `submit` when no response was obtained
    pub unreachable_message: &'static str,
    /// Replaces `unreachable_message` when the transport reports which server
    /// it tried; `{server}` is substituted.
    pub unreachable_server_message: Option<&'static str>,
}

impl FlowDescriptor {
    /// Message for a request that got no response from `server`, if known.
    pub fn unreachable_message_for(&self, server: Option<&str>) -> String {
        match (self.unreachable_server_message, server) {
            (Some(template), Some(server)) => template.replace("{server}", server),
            _ => self.unreachable_message.to_string(),
        }
    }
}

pub const LOGIN_ENDPOINT: &str = "/api/auth/login";

static CLIENT_LOGIN: FlowDescriptor = FlowDescriptor {
    flow: Flow::ClientLogin,
    role: Role::Client,
    kind: FlowKind::Login,
    fields: LOGIN_FIELDS,
    endpoint: LOGIN_ENDPOINT,
    failure_message: "Invalid email or password. Please try again.",
    unreachable_message: "Could not connect to the server. Please try again later.",
    unreachable_server_message: None,
};

static CLIENT_REGISTRATION: FlowDescriptor = FlowDescriptor {
    flow: Flow::ClientRegistration,
    role: Role::Client,
    kind: FlowKind::Registration,
    fields: CLIENT_REGISTRATION_FIELDS,
    endpoint: "/api/auth/register/client",
    failure_message: "Registration failed. Please try again.",
    unreachable_message: "Could not connect to the server. Please ensure the backend is running.",
    unreachable_server_message: None,
};

static FREELANCER_LOGIN: FlowDescriptor = FlowDescriptor {
    flow: Flow::FreelancerLogin,
    role: Role::Freelancer,
    kind: FlowKind::Login,
    fields: LOGIN_FIELDS,
    endpoint: LOGIN_ENDPOINT,
    failure_message: "Invalid email or password. Please try again.",
    unreachable_message: "Server is currently offline. Please try again later.",
    unreachable_server_message: None,
};

static FREELANCER_REGISTRATION: FlowDescriptor = FlowDescriptor {
    flow: Flow::FreelancerRegistration,
    role: Role::Freelancer,
    kind: FlowKind::Registration,
    fields: FREELANCER_REGISTRATION_FIELDS,
    endpoint: "/api/auth/register/freelancer",
    failure_message: "Registration failed. Please try again.",
    unreachable_message: "Connection to server failed.",
    unreachable_server_message: None,
};

static ADMIN_LOGIN: FlowDescriptor = FlowDescriptor {
    flow: Flow::AdminLogin,
    role: Role::Admin,
    kind: FlowKind::Login,
    fields: LOGIN_FIELDS,
    endpoint: LOGIN_ENDPOINT,
    failure_message: "Invalid admin credentials. Please try again.",
    unreachable_message: "The server is not responding. Please try again later.",
    unreachable_server_message: None,
};

static ADMIN_REGISTRATION: FlowDescriptor = FlowDescriptor {
    flow: Flow::AdminRegistration,
    role: Role::Admin,
    kind: FlowKind::Registration,
    fields: ADMIN_REGISTRATION_FIELDS,
    endpoint: "/api/auth/register/admin",
    failure_message: "Registration failed. Check your Admin Code.",
    unreachable_message: "The backend server is unreachable. Please verify it is running.",
    unreachable_server_message: Some("The backend server is unreachable. Please verify it is running at {server}."),
};

impl Flow {
    pub const ALL: [Flow; 6] = [
        Flow::ClientLogin,
        Flow::ClientRegistration,
        Flow::FreelancerLogin,
        Flow::FreelancerRegistration,
        Flow::AdminLogin,
        Flow::AdminRegistration,
    ];

    pub fn descriptor(&self) -> &'static FlowDescriptor {
        match self {
            Flow::ClientLogin => &CLIENT_LOGIN,
            Flow::ClientRegistration => &CLIENT_REGISTRATION,
            Flow::FreelancerLogin => &FREELANCER_LOGIN,
            Flow::FreelancerRegistration => &FREELANCER_REGISTRATION,
            Flow::AdminLogin => &ADMIN_LOGIN,
            Flow::AdminRegistration => &ADMIN_REGISTRATION,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Flow::ClientLogin => "client-login",
            Flow::ClientRegistration => "client-registration",
            Flow::FreelancerLogin => "freelancer-login",
            Flow::FreelancerRegistration => "freelancer-registration",
            Flow::AdminLogin => "admin-login",
            Flow::AdminRegistration => "admin-registration",
        }
    }

    pub fn is_login(&self) -> bool {
        self.descriptor().kind == FlowKind::Login
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Flow {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Flow::ALL
            .into_iter()
            .find(|flow| flow.name() == s)
            .ok_or_else(|| FormError::UnknownFlow(s.to_string()))
    }
}

impl FlowDescriptor {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}
