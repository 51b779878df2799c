//! Workspace-level integration tests for TrafficDeck.
