// crates/shared-kernel/src/domain/events/event.rs

use chrono::{DateTime, Utc};
use dyn_clone::DynClone;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt::Debug;
use uuid::Uuid;

pub trait DomainEvent: DynClone + Debug + Send + Sync {
    /// Identifiant unique de l'événement (pour l'idempotence côté sink)
    fn event_id(&self) -> Uuid {
        Uuid::now_v7()
    }

    /// Nom stable de l'événement (ex: "OrderCreated")
    fn event_type(&self) -> Cow<'_, str>;

    /// Nom de l'agrégat émetteur (ex: "Order").
    /// Champ explicite : jamais dérivé du nom de type.
    fn aggregate_type(&self) -> Cow<'_, str>;

    /// Identifiant de l'agrégat émetteur
    fn aggregate_id(&self) -> String;

    /// Horodatage UTC du fait métier
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Les données réelles en JSON
    fn payload(&self) -> Value;
}

dyn_clone::clone_trait_object!(DomainEvent);
