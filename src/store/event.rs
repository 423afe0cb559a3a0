use uuid::Uuid;

/// A change notification emitted by the store after every mutation.
///
/// Material and step mutations emit [`StoreEvent::ProjectUpdated`] for the
/// owning project, since its `updated_at` changed with them. Events carry
/// ids only; consumers re-read the project from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    ProjectCreated { project_id: Uuid },
    ProjectUpdated { project_id: Uuid },
    ProjectDeleted { project_id: Uuid },
}

impl StoreEvent {
    /// The id of the project the event refers to.
    pub fn project_id(&self) -> Uuid {
        match self {
            Self::ProjectCreated { project_id }
            | Self::ProjectUpdated { project_id }
            | Self::ProjectDeleted { project_id } => *project_id,
        }
    }
}
