use crate::{
    error::Error,
    service::{
        DataService, RelationshipName, RelationshipRole, ServiceRequest, ServiceResponse,
    },
    types::RecordRef,
};

enum LinkOp {
    Associate,
    Disassociate,
}

/// associate
/// Links `related` records to `parent` through the `via` intersect
/// relationship, in batches of `batch_size` (all at once when `None`).
///
/// Each batch is one atomic remote request. A failure in batch k leaves
/// batches 1..k applied; there is no rollback, callers needing atomicity
/// across the whole set must not batch.
pub fn associate(
    service: &dyn DataService,
    parent: &RecordRef,
    related: &[RecordRef],
    via: &str,
    batch_size: Option<usize>,
) -> Result<(), Error> {
    submit_links(service, parent, related, via, batch_size, &LinkOp::Associate)
}

/// Inverse of [`associate`]; same batching and failure semantics.
pub fn disassociate(
    service: &dyn DataService,
    parent: &RecordRef,
    related: &[RecordRef],
    via: &str,
    batch_size: Option<usize>,
) -> Result<(), Error> {
    submit_links(
        service,
        parent,
        related,
        via,
        batch_size,
        &LinkOp::Disassociate,
    )
}

fn submit_links(
    service: &dyn DataService,
    parent: &RecordRef,
    related: &[RecordRef],
    via: &str,
    batch_size: Option<usize>,
    op: &LinkOp,
) -> Result<(), Error> {
    if batch_size == Some(0) {
        return Err(Error::BatchSize);
    }
    if parent.id.is_unset() {
        return Err(Error::UnsetParentId {
            entity: parent.entity.clone(),
        });
    }
    if related.is_empty() {
        return Ok(());
    }

    let relationship = RelationshipName {
        name: via.to_string(),
        role: referencing_role(parent, related),
    };
    let batch = batch_size.unwrap_or(related.len());

    for chunk in related.chunks(batch) {
        let request = match op {
            LinkOp::Associate => ServiceRequest::Associate {
                target: parent.clone(),
                relationship: relationship.clone(),
                related: chunk.to_vec(),
            },
            LinkOp::Disassociate => ServiceRequest::Disassociate {
                target: parent.clone(),
                relationship: relationship.clone(),
                related: chunk.to_vec(),
            },
        };

        match service.execute(&request)? {
            ServiceResponse::Unit => {}
            _ => {
                return Err(Error::UnexpectedResponse {
                    request: match op {
                        LinkOp::Associate => "Associate",
                        LinkOp::Disassociate => "Disassociate",
                    },
                });
            }
        }
    }

    Ok(())
}

/// The explicit role, required exactly when the relationship is
/// self-referential. The first related record decides, matching how the
/// server validates the request.
fn referencing_role(parent: &RecordRef, related: &[RecordRef]) -> Option<RelationshipRole> {
    related
        .first()
        .filter(|reference| reference.entity == parent.entity)
        .map(|_| RelationshipRole::Referencing)
}

///
/// TESTS
///
