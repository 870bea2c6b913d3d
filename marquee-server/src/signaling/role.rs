use marquee_core::Role;

/// Per-connection role machine. The first message on a signaling connection
/// must declare the role; once assigned it never changes for that
/// connection's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoleState {
    #[default]
    AwaitingRole,
    Assigned(Role),
}

impl RoleState {
    pub fn new() -> Self {
        Self::AwaitingRole
    }

    /// Assign the declared role. Returns `false` (and keeps the existing
    /// role) if one was already assigned.
    pub fn assign(&mut self, role: Role) -> bool {
        match self {
            Self::AwaitingRole => {
                *self = Self::Assigned(role);
                true
            }
            Self::Assigned(_) => false,
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            Self::AwaitingRole => None,
            Self::Assigned(role) => Some(*role),
        }
    }
}
