#![allow(dead_code)]

use std::sync::Arc;

use nexuslink_crm::repository::RemoteRepository;
use nexuslink_crm::repository::backend::UserSession;
use nexuslink_crm::repository::memory::MemoryBackend;
use serde_json::{Value, json};

/// Backend seeded with a small, consistent CRM data set.
pub fn seeded_backend() -> Arc<MemoryBackend> {
    Arc::new(
        MemoryBackend::new()
            .with_rows("contact1", contacts())
            .with_rows("company", companies())
            .with_rows("deal1", deals())
            .with_rows("task", tasks())
            .with_rows("Activity2", activities())
            .with_session(UserSession {
                user_id: "user-1".to_string(),
                email: "owner@nexuslink.test".to_string(),
                first_name: Some("Olivia".to_string()),
                last_name: Some("Owner".to_string()),
            }),
    )
}

pub fn repository(backend: &Arc<MemoryBackend>) -> RemoteRepository {
    RemoteRepository::new(backend.clone())
}

fn contacts() -> Vec<Value> {
    vec![
        json!({"Id": 1, "Name": "John Smith", "firstName": "John", "lastName": "Smith",
               "email": "john@acme.com", "company": "Acme Corp", "type": "customer", "status": "active"}),
        json!({"Id": 2, "Name": "Sarah Johnson", "firstName": "Sarah", "lastName": "Johnson",
               "email": "sarah@globex.com", "company": "Globex", "type": "lead", "status": "active"}),
        json!({"Id": 3, "Name": "Mike Chen", "firstName": "Mike", "lastName": "Chen",
               "email": "mike@initech.com", "type": "vendor", "status": "inactive"}),
    ]
}

fn companies() -> Vec<Value> {
    vec![
        json!({"Id": 1, "Name": "Acme Corp", "industry": "Technology", "size": "51-200",
               "location": "Berlin", "website": "https://acme.example", "contacts": [1, 99], "deals": "1,2"}),
        json!({"Id": 2, "Name": "Globex", "industry": "Finance", "size": "1-10", "location": "London"}),
    ]
}

fn deals() -> Vec<Value> {
    vec![
        json!({"Id": 1, "Name": "Acme renewal", "company": "Acme Corp", "value": "$12,000",
               "stage": "negotiation", "contact": "John Smith", "date": "2024-04-01"}),
        json!({"Id": 2, "Name": "Acme expansion", "company": "Acme Corp", "value": "$3,000",
               "stage": "closed", "date": "2024-02-01"}),
        json!({"Id": 3, "Name": "Globex pilot", "company": "Globex", "value": 500,
               "stage": "lead", "contact": "Sarah Johnson"}),
    ]
}

fn tasks() -> Vec<Value> {
    vec![
        json!({"Id": 1, "Name": "Send proposal", "title": "Send proposal", "dueDate": "2024-03-05",
               "priority": "high", "category": "email", "status": "pending"}),
        json!({"Id": 2, "Name": "Kickoff call", "title": "Kickoff call", "dueDate": "2024-03-01",
               "priority": "medium", "category": "call", "status": "completed"}),
        json!({"Id": 3, "Name": "Quarterly review", "title": "Quarterly review", "dueDate": "2024-06-30",
               "priority": "low", "category": "meeting", "status": "in-progress"}),
    ]
}

fn activities() -> Vec<Value> {
    vec![
        json!({"Id": 1, "Name": "Call with John", "title": "Call with John", "type": "call",
               "date": "2024-03-10T09:00:00", "contact": "John Smith"}),
        json!({"Id": 2, "Name": "Email to Sarah", "title": "Email to Sarah", "type": "email",
               "date": "2024-03-09T10:00:00", "contact": "Sarah Johnson"}),
        json!({"Id": 3, "Name": "Old note", "title": "Old note", "type": "note",
               "date": "2024-01-01T10:00:00"}),
    ]
}
