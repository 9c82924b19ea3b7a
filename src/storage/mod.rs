use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{
    AiSuggestion, Character, CreateAiSuggestionRequest, CreateCharacterRequest,
    CreateDocumentRequest, CreateLocationRequest, CreateTimelineEventRequest, Document, Location,
    TimelineEvent, UpdateCharacterRequest, UpdateDocumentRequest, UpdateLocationRequest,
    UpdateTimelineEventRequest,
};

/// In-memory store for documents and their derived entities.
///
/// Interior-mutable so it can be shared behind an `Arc`; nothing here is
/// durable. The collaboration relay never touches this layer — document
/// content reaches it through the REST API only.
#[derive(Debug, Default)]
pub struct MemStorage {
    documents: RwLock<HashMap<Uuid, Document>>,
    characters: RwLock<HashMap<Uuid, Character>>,
    locations: RwLock<HashMap<Uuid, Location>>,
    timeline_events: RwLock<HashMap<Uuid, TimelineEvent>>,
    ai_suggestions: RwLock<HashMap<Uuid, AiSuggestion>>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    // Document operations

    pub async fn get_document(&self, id: Uuid) -> Option<Document> {
        self.documents.read().await.get(&id).cloned()
    }

    pub async fn document_exists(&self, id: Uuid) -> bool {
        self.documents.read().await.contains_key(&id)
    }

    pub async fn document_count(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn create_document(&self, req: CreateDocumentRequest) -> Document {
        let now = Utc::now();
        let document = Document {
            id: Uuid::new_v4(),
            title: req.title,
            content: req.content,
            word_count: req.word_count,
            last_saved: now,
            created_at: now,
        };
        self.documents
            .write()
            .await
            .insert(document.id, document.clone());
        document
    }

    pub async fn update_document(
        &self,
        id: Uuid,
        updates: UpdateDocumentRequest,
    ) -> Option<Document> {
        let mut documents = self.documents.write().await;
        let document = documents.get_mut(&id)?;
        if let Some(title) = updates.title {
            document.title = title;
        }
        if let Some(content) = updates.content {
            document.content = content;
        }
        if let Some(word_count) = updates.word_count {
            document.word_count = word_count;
        }
        document.last_saved = Utc::now();
        Some(document.clone())
    }

    pub async fn delete_document(&self, id: Uuid) -> bool {
        let removed = self.documents.write().await.remove(&id).is_some();
        if removed {
            // Entities reference documents with cascade-on-delete semantics.
            self.characters
                .write()
                .await
                .retain(|_, c| c.document_id != id);
            self.locations
                .write()
                .await
                .retain(|_, l| l.document_id != id);
            self.timeline_events
                .write()
                .await
                .retain(|_, e| e.document_id != id);
            self.ai_suggestions
                .write()
                .await
                .retain(|_, s| s.document_id != id);
        }
        removed
    }

    // Character operations

    pub async fn get_characters_by_document(&self, document_id: Uuid) -> Vec<Character> {
        self.characters
            .read()
            .await
            .values()
            .filter(|c| c.document_id == document_id)
            .cloned()
            .collect()
    }

    pub async fn create_character(&self, req: CreateCharacterRequest) -> Character {
        let character = Character {
            id: Uuid::new_v4(),
            document_id: req.document_id,
            name: req.name,
            role: req.role,
            age: req.age,
            appearance: req.appearance,
            traits: req.traits,
            relationships: req
                .relationships
                .unwrap_or_else(|| serde_json::Value::Array(Vec::new())),
            last_mentioned: req.last_mentioned,
        };
        self.characters
            .write()
            .await
            .insert(character.id, character.clone());
        character
    }

    pub async fn update_character(
        &self,
        id: Uuid,
        updates: UpdateCharacterRequest,
    ) -> Option<Character> {
        let mut characters = self.characters.write().await;
        let character = characters.get_mut(&id)?;
        if let Some(name) = updates.name {
            character.name = name;
        }
        if updates.role.is_some() {
            character.role = updates.role;
        }
        if updates.age.is_some() {
            character.age = updates.age;
        }
        if updates.appearance.is_some() {
            character.appearance = updates.appearance;
        }
        if updates.traits.is_some() {
            character.traits = updates.traits;
        }
        if let Some(relationships) = updates.relationships {
            character.relationships = relationships;
        }
        if updates.last_mentioned.is_some() {
            character.last_mentioned = updates.last_mentioned;
        }
        Some(character.clone())
    }

    pub async fn delete_character(&self, id: Uuid) -> bool {
        self.characters.write().await.remove(&id).is_some()
    }

    // Location operations

    pub async fn get_locations_by_document(&self, document_id: Uuid) -> Vec<Location> {
        self.locations
            .read()
            .await
            .values()
            .filter(|l| l.document_id == document_id)
            .cloned()
            .collect()
    }

    pub async fn create_location(&self, req: CreateLocationRequest) -> Location {
        let location = Location {
            id: Uuid::new_v4(),
            document_id: req.document_id,
            name: req.name,
            kind: req.kind,
            description: req.description,
            key_features: req.key_features,
            first_mentioned: req.first_mentioned,
        };
        self.locations
            .write()
            .await
            .insert(location.id, location.clone());
        location
    }

    pub async fn update_location(
        &self,
        id: Uuid,
        updates: UpdateLocationRequest,
    ) -> Option<Location> {
        let mut locations = self.locations.write().await;
        let location = locations.get_mut(&id)?;
        if let Some(name) = updates.name {
            location.name = name;
        }
        if updates.kind.is_some() {
            location.kind = updates.kind;
        }
        if updates.description.is_some() {
            location.description = updates.description;
        }
        if updates.key_features.is_some() {
            location.key_features = updates.key_features;
        }
        if updates.first_mentioned.is_some() {
            location.first_mentioned = updates.first_mentioned;
        }
        Some(location.clone())
    }

    pub async fn delete_location(&self, id: Uuid) -> bool {
        self.locations.write().await.remove(&id).is_some()
    }

    // Timeline operations

    /// Events for a document, ordered by their `order` field.
    pub async fn get_timeline_events_by_document(&self, document_id: Uuid) -> Vec<TimelineEvent> {
        let mut events: Vec<TimelineEvent> = self
            .timeline_events
            .read()
            .await
            .values()
            .filter(|e| e.document_id == document_id)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.order);
        events
    }

    pub async fn create_timeline_event(&self, req: CreateTimelineEventRequest) -> TimelineEvent {
        let event = TimelineEvent {
            id: Uuid::new_v4(),
            document_id: req.document_id,
            title: req.title,
            chapter: req.chapter,
            description: req.description,
            order: req.order,
        };
        self.timeline_events
            .write()
            .await
            .insert(event.id, event.clone());
        event
    }

    pub async fn update_timeline_event(
        &self,
        id: Uuid,
        updates: UpdateTimelineEventRequest,
    ) -> Option<TimelineEvent> {
        let mut events = self.timeline_events.write().await;
        let event = events.get_mut(&id)?;
        if let Some(title) = updates.title {
            event.title = title;
        }
        if updates.chapter.is_some() {
            event.chapter = updates.chapter;
        }
        if updates.description.is_some() {
            event.description = updates.description;
        }
        if let Some(order) = updates.order {
            event.order = order;
        }
        Some(event.clone())
    }

    pub async fn delete_timeline_event(&self, id: Uuid) -> bool {
        self.timeline_events.write().await.remove(&id).is_some()
    }

    // AI suggestion operations

    pub async fn get_ai_suggestions_by_document(&self, document_id: Uuid) -> Vec<AiSuggestion> {
        self.ai_suggestions
            .read()
            .await
            .values()
            .filter(|s| s.document_id == document_id)
            .cloned()
            .collect()
    }

    pub async fn create_ai_suggestion(&self, req: CreateAiSuggestionRequest) -> AiSuggestion {
        let suggestion = AiSuggestion {
            id: Uuid::new_v4(),
            document_id: req.document_id,
            kind: req.kind,
            original_text: req.original_text,
            suggestion: req.suggestion,
            position: req.position,
            applied: req.applied,
        };
        self.ai_suggestions
            .write()
            .await
            .insert(suggestion.id, suggestion.clone());
        suggestion
    }

    pub async fn delete_ai_suggestion(&self, id: Uuid) -> bool {
        self.ai_suggestions.write().await.remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_request(title: &str) -> CreateDocumentRequest {
        CreateDocumentRequest {
            title: title.to_string(),
            content: String::new(),
            word_count: 0,
        }
    }

    #[tokio::test]
    async fn document_lifecycle() {
        let storage = MemStorage::new();
        let doc = storage.create_document(doc_request("Chapter One")).await;
        assert_eq!(storage.get_document(doc.id).await.unwrap().title, "Chapter One");

        let updated = storage
            .update_document(
                doc.id,
                UpdateDocumentRequest {
                    content: Some("It was a dark and stormy night.".to_string()),
                    word_count: Some(7),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.word_count, 7);
        assert_eq!(updated.title, "Chapter One");
        assert!(updated.last_saved >= doc.last_saved);

        assert!(storage.delete_document(doc.id).await);
        assert!(storage.get_document(doc.id).await.is_none());
        assert!(!storage.delete_document(doc.id).await);
    }

    #[tokio::test]
    async fn update_of_unknown_document_returns_none() {
        let storage = MemStorage::new();
        let missing = storage
            .update_document(Uuid::new_v4(), UpdateDocumentRequest::default())
            .await;
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn characters_are_scoped_to_their_document() {
        let storage = MemStorage::new();
        let doc_a = storage.create_document(doc_request("A")).await;
        let doc_b = storage.create_document(doc_request("B")).await;

        storage
            .create_character(CreateCharacterRequest {
                document_id: doc_a.id,
                name: "Sarah".to_string(),
                role: Some("protagonist".to_string()),
                age: None,
                appearance: None,
                traits: None,
                relationships: None,
                last_mentioned: None,
            })
            .await;

        assert_eq!(storage.get_characters_by_document(doc_a.id).await.len(), 1);
        assert!(storage.get_characters_by_document(doc_b.id).await.is_empty());
    }

    #[tokio::test]
    async fn character_defaults_relationships_to_empty_array() {
        let storage = MemStorage::new();
        let doc = storage.create_document(doc_request("A")).await;
        let character = storage
            .create_character(CreateCharacterRequest {
                document_id: doc.id,
                name: "Sarah".to_string(),
                role: None,
                age: None,
                appearance: None,
                traits: None,
                relationships: None,
                last_mentioned: None,
            })
            .await;
        assert_eq!(character.relationships, serde_json::json!([]));
    }

    #[tokio::test]
    async fn timeline_events_are_sorted_by_order() {
        let storage = MemStorage::new();
        let doc = storage.create_document(doc_request("A")).await;
        for (title, order) in [("climax", 3), ("setup", 1), ("twist", 2)] {
            storage
                .create_timeline_event(CreateTimelineEventRequest {
                    document_id: doc.id,
                    title: title.to_string(),
                    chapter: None,
                    description: None,
                    order,
                })
                .await;
        }
        let events = storage.get_timeline_events_by_document(doc.id).await;
        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["setup", "twist", "climax"]);
    }

    #[tokio::test]
    async fn ai_suggestions_are_stored_per_document() {
        let storage = MemStorage::new();
        let doc = storage.create_document(doc_request("A")).await;
        let suggestion = storage
            .create_ai_suggestion(CreateAiSuggestionRequest {
                document_id: doc.id,
                kind: "style".to_string(),
                original_text: "very unique".to_string(),
                suggestion: "unique".to_string(),
                position: 12,
                applied: false,
            })
            .await;
        assert!(!suggestion.applied);
        assert_eq!(storage.get_ai_suggestions_by_document(doc.id).await.len(), 1);

        assert!(storage.delete_ai_suggestion(suggestion.id).await);
        assert!(storage.get_ai_suggestions_by_document(doc.id).await.is_empty());
    }

    #[tokio::test]
    async fn deleting_a_document_cascades_to_entities() {
        let storage = MemStorage::new();
        let doc = storage.create_document(doc_request("A")).await;
        storage
            .create_location(CreateLocationRequest {
                document_id: doc.id,
                name: "The mansion".to_string(),
                kind: Some("mansion".to_string()),
                description: None,
                key_features: None,
                first_mentioned: None,
            })
            .await;

        storage.delete_document(doc.id).await;
        assert!(storage.get_locations_by_document(doc.id).await.is_empty());
    }
}
