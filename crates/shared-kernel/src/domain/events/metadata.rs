// crates/shared-kernel/src/domain/events/metadata.rs

use crate::domain::events::DomainEvent;

/// Données techniques partagées par tous les agrégats :
/// le tampon d'événements en attente de drainage.
#[derive(Debug, Default)]
pub struct AggregateMetadata {
    events: Vec<Box<dyn DomainEvent>>,
}

impl AggregateMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_event(&mut self, event: Box<dyn DomainEvent>) {
        self.events.push(event);
    }

    /// Récupère ET vide le tampon en une seule opération.
    /// Un second appel sans nouvelle mutation retourne une liste vide.
    pub fn pull_events(&mut self) -> Vec<Box<dyn DomainEvent>> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_count(&self) -> usize {
        self.events.len()
    }
}

// Un clone d'agrégat ne ré-embarque jamais les événements en attente :
// seule l'instance mutée les publie.
impl Clone for AggregateMetadata {
    fn clone(&self) -> Self {
        Self { events: Vec::new() }
    }
}

/// Trait maître des agrégats. L'entité n'implémente que l'identité
/// et l'accès aux métadonnées, le reste est fourni.
pub trait AggregateRoot: Send + Sync {
    /// Identifiant de l'agrégat sous forme de chaîne
    fn id(&self) -> String;

    fn metadata(&self) -> &AggregateMetadata;

    fn metadata_mut(&mut self) -> &mut AggregateMetadata;

    /// Enregistre un fait métier
    fn add_event(&mut self, event: Box<dyn DomainEvent>) {
        self.metadata_mut().add_event(event);
    }

    /// Draine la file d'événements pour traitement (outbox)
    fn pull_events(&mut self) -> Vec<Box<dyn DomainEvent>> {
        self.metadata_mut().pull_events()
    }
}
