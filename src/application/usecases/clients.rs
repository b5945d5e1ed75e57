use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::clients::ClientEntity,
    repositories::clients::ClientRepository,
    value_objects::clients::{MAX_SEARCH_TERM_LEN, SEARCH_RESULT_LIMIT, SaveClientModel},
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid client request: {0}")]
    InvalidArgument(String),
    #[error("client not found")]
    NotFound,
    #[error("failed to save the client")]
    Internal(#[source] anyhow::Error),
}

pub struct ClientUseCase<C>
where
    C: ClientRepository + Send + Sync + 'static,
{
    client_repository: Arc<C>,
}

impl<C> ClientUseCase<C>
where
    C: ClientRepository + Send + Sync + 'static,
{
    pub fn new(client_repository: Arc<C>) -> Self {
        Self { client_repository }
    }

    pub async fn create(&self, owner_id: Uuid, model: SaveClientModel) -> Result<Uuid, ClientError> {
        model.validate().map_err(|err| {
            warn!(%owner_id, error = %err, "clients: invalid create request");
            ClientError::InvalidArgument(err.to_string())
        })?;

        let client_id = self
            .client_repository
            .insert(model.to_insert_entity(owner_id))
            .await
            .map_err(|err| {
                error!(%owner_id, db_error = ?err, "clients: insert failed");
                ClientError::Internal(err)
            })?;

        info!(%owner_id, %client_id, "clients: client created");
        Ok(client_id)
    }

    pub async fn update(
        &self,
        owner_id: Uuid,
        client_id: Uuid,
        model: SaveClientModel,
    ) -> Result<(), ClientError> {
        model.validate().map_err(|err| {
            warn!(%owner_id, %client_id, error = %err, "clients: invalid update request");
            ClientError::InvalidArgument(err.to_string())
        })?;

        let changed = self
            .client_repository
            .update(client_id, owner_id, model.to_update_entity())
            .await
            .map_err(|err| {
                error!(%owner_id, %client_id, db_error = ?err, "clients: update failed");
                ClientError::Internal(err)
            })?;

        if changed == 0 {
            return Err(ClientError::NotFound);
        }
        info!(%owner_id, %client_id, "clients: client updated");
        Ok(())
    }

    pub async fn delete(&self, owner_id: Uuid, client_id: Uuid) -> Result<(), ClientError> {
        let deleted = self
            .client_repository
            .delete(client_id, owner_id)
            .await
            .map_err(|err| {
                error!(%owner_id, %client_id, db_error = ?err, "clients: delete failed");
                ClientError::Internal(err)
            })?;

        if deleted == 0 {
            return Err(ClientError::NotFound);
        }
        info!(%owner_id, %client_id, "clients: client deleted");
        Ok(())
    }

    pub async fn get(&self, owner_id: Uuid, client_id: Uuid) -> Result<ClientEntity, ClientError> {
        let client = self
            .client_repository
            .find_by_id(client_id)
            .await
            .map_err(ClientError::Internal)?
            .ok_or(ClientError::NotFound)?;

        // Clients of other accounts are indistinguishable from missing ones.
        if client.owner_id != owner_id {
            return Err(ClientError::NotFound);
        }
        Ok(client)
    }

    pub async fn list(&self, owner_id: Uuid) -> Result<Vec<ClientEntity>, ClientError> {
        self.client_repository
            .list(owner_id)
            .await
            .map_err(|err| {
                error!(%owner_id, db_error = ?err, "clients: listing failed");
                ClientError::Internal(err)
            })
    }

    /// Prefix search across name, whatsapp and instagram. The three scans run
    /// sequentially and their hits are merged in that order, deduplicated by
    /// id and capped at [`SEARCH_RESULT_LIMIT`].
    pub async fn search(
        &self,
        owner_id: Uuid,
        term: &str,
    ) -> Result<Vec<ClientEntity>, ClientError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(vec![]);
        }
        if term.len() > MAX_SEARCH_TERM_LEN {
            return Err(ClientError::InvalidArgument(
                "search term is too long".to_string(),
            ));
        }

        let lowered = term.to_lowercase();
        let instagram_term = lowered.trim_start_matches('@').to_string();

        let by_name = self
            .client_repository
            .search_by_name_prefix(owner_id, lowered.clone(), SEARCH_RESULT_LIMIT)
            .await
            .map_err(ClientError::Internal)?;
        let by_whatsapp = self
            .client_repository
            .search_by_whatsapp_prefix(owner_id, term.to_string(), SEARCH_RESULT_LIMIT)
            .await
            .map_err(ClientError::Internal)?;
        let by_instagram = self
            .client_repository
            .search_by_instagram_prefix(owner_id, instagram_term, SEARCH_RESULT_LIMIT)
            .await
            .map_err(ClientError::Internal)?;

        let mut seen = Vec::with_capacity(SEARCH_RESULT_LIMIT as usize);
        let mut results = Vec::with_capacity(SEARCH_RESULT_LIMIT as usize);
        for client in by_name.into_iter().chain(by_whatsapp).chain(by_instagram) {
            if results.len() >= SEARCH_RESULT_LIMIT as usize {
                break;
            }
            if seen.contains(&client.id) {
                continue;
            }
            seen.push(client.id);
            results.push(client);
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockall::predicate::eq;

    use crate::domain::repositories::clients::MockClientRepository;

    fn client_named(owner_id: Uuid, name: &str) -> ClientEntity {
        ClientEntity {
            id: Uuid::new_v4(),
            owner_id,
            name: name.to_string(),
            name_lowercase: name.to_lowercase(),
            whatsapp: "11999990000".to_string(),
            instagram: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_normalizes_before_inserting() {
        let owner_id = Uuid::new_v4();

        let mut repo = MockClientRepository::new();
        repo.expect_insert()
            .withf(|entity| {
                entity.name == "Maria Silva"
                    && entity.name_lowercase == "maria silva"
                    && entity.instagram.as_deref() == Some("maria")
            })
            .returning(|_| Box::pin(async { Ok(Uuid::new_v4()) }));

        let usecase = ClientUseCase::new(Arc::new(repo));
        usecase
            .create(
                owner_id,
                SaveClientModel {
                    name: " Maria Silva ".to_string(),
                    whatsapp: "11999990000".to_string(),
                    instagram: Some("https://instagram.com/maria".to_string()),
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_of_a_foreign_or_missing_client_is_not_found() {
        let mut repo = MockClientRepository::new();
        repo.expect_update()
            .returning(|_, _, _| Box::pin(async { Ok(0) }));

        let usecase = ClientUseCase::new(Arc::new(repo));
        let err = usecase
            .update(
                Uuid::new_v4(),
                Uuid::new_v4(),
                SaveClientModel {
                    name: "Maria".to_string(),
                    whatsapp: "11999990000".to_string(),
                    instagram: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::NotFound));
    }

    #[tokio::test]
    async fn get_hides_clients_of_other_accounts() {
        let foreign = client_named(Uuid::new_v4(), "Maria");
        let client_id = foreign.id;

        let mut repo = MockClientRepository::new();
        repo.expect_find_by_id().returning(move |_| {
            let client = foreign.clone();
            Box::pin(async move { Ok(Some(client)) })
        });

        let usecase = ClientUseCase::new(Arc::new(repo));
        let err = usecase
            .get(Uuid::new_v4(), client_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::NotFound));
    }

    #[tokio::test]
    async fn search_merges_the_three_scans_and_dedupes_by_id() {
        let owner_id = Uuid::new_v4();
        let shared = client_named(owner_id, "Ana");
        let by_name_only = client_named(owner_id, "Anita");
        let by_instagram_only = client_named(owner_id, "Beatriz");

        let name_hits = vec![shared.clone(), by_name_only.clone()];
        let whatsapp_hits = vec![shared.clone()];
        let instagram_hits = vec![by_instagram_only.clone()];

        let mut repo = MockClientRepository::new();
        repo.expect_search_by_name_prefix()
            .with(eq(owner_id), eq("ana".to_string()), eq(SEARCH_RESULT_LIMIT))
            .returning(move |_, _, _| {
                let hits = name_hits.clone();
                Box::pin(async move { Ok(hits) })
            });
        repo.expect_search_by_whatsapp_prefix().returning(move |_, _, _| {
            let hits = whatsapp_hits.clone();
            Box::pin(async move { Ok(hits) })
        });
        repo.expect_search_by_instagram_prefix().returning(move |_, _, _| {
            let hits = instagram_hits.clone();
            Box::pin(async move { Ok(hits) })
        });

        let usecase = ClientUseCase::new(Arc::new(repo));
        let results = usecase.search(owner_id, "Ana").await.unwrap();

        let ids: Vec<Uuid> = results.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![shared.id, by_name_only.id, by_instagram_only.id]);
    }

    #[tokio::test]
    async fn search_results_are_capped() {
        let owner_id = Uuid::new_v4();
        let name_hits: Vec<ClientEntity> = (0..SEARCH_RESULT_LIMIT)
            .map(|i| client_named(owner_id, &format!("Ana {i}")))
            .collect();
        let extra = vec![client_named(owner_id, "Outro")];

        let mut repo = MockClientRepository::new();
        repo.expect_search_by_name_prefix().returning(move |_, _, _| {
            let hits = name_hits.clone();
            Box::pin(async move { Ok(hits) })
        });
        repo.expect_search_by_whatsapp_prefix()
            .returning(|_, _, _| Box::pin(async { Ok(vec![]) }));
        repo.expect_search_by_instagram_prefix().returning(move |_, _, _| {
            let hits = extra.clone();
            Box::pin(async move { Ok(hits) })
        });

        let usecase = ClientUseCase::new(Arc::new(repo));
        let results = usecase.search(owner_id, "ana").await.unwrap();
        assert_eq!(results.len(), SEARCH_RESULT_LIMIT as usize);
    }

    #[tokio::test]
    async fn blank_search_term_returns_nothing_without_touching_the_store() {
        let mut repo = MockClientRepository::new();
        repo.expect_search_by_name_prefix().times(0);
        repo.expect_search_by_whatsapp_prefix().times(0);
        repo.expect_search_by_instagram_prefix().times(0);

        let usecase = ClientUseCase::new(Arc::new(repo));
        let results = usecase.search(Uuid::new_v4(), "   ").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn overlong_search_term_is_rejected() {
        let repo = MockClientRepository::new();
        let usecase = ClientUseCase::new(Arc::new(repo));

        let term = "a".repeat(MAX_SEARCH_TERM_LEN + 1);
        let err = usecase.search(Uuid::new_v4(), &term).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn instagram_scan_receives_the_term_without_the_at_prefix() {
        let owner_id = Uuid::new_v4();

        let mut repo = MockClientRepository::new();
        repo.expect_search_by_name_prefix()
            .returning(|_, _, _| Box::pin(async { Ok(vec![]) }));
        repo.expect_search_by_whatsapp_prefix()
            .returning(|_, _, _| Box::pin(async { Ok(vec![]) }));
        repo.expect_search_by_instagram_prefix()
            .with(eq(owner_id), eq("maria".to_string()), eq(SEARCH_RESULT_LIMIT))
            .returning(|_, _, _| Box::pin(async { Ok(vec![]) }));

        let usecase = ClientUseCase::new(Arc::new(repo));
        usecase.search(owner_id, "@Maria").await.unwrap();
    }
}
