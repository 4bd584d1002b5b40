use crate::{
    DEFAULT_PAGE_SIZE, MAX_PAGES,
    error::Error,
    query::{PageInfo, Query},
    service::DataService,
    types::RecordSet,
};

/// Runs a query to completion at the default page size.
pub fn retrieve_all(service: &dyn DataService, query: Query) -> Result<RecordSet, Error> {
    retrieve_all_with(service, query, DEFAULT_PAGE_SIZE)
}

/// retrieve_all_with
/// Drives `query` across as many round trips as the server asks for,
/// page numbers counting up from 1, the opaque paging cookie carried
/// verbatim from each response into the next request. Any paging the
/// caller set on the query is replaced.
///
/// A server that still reports more records after [`MAX_PAGES`] round
/// trips is treated as broken ([`Error::PageOverrun`]).
pub fn retrieve_all_with(
    service: &dyn DataService,
    mut query: Query,
    page_size: u32,
) -> Result<RecordSet, Error> {
    let mut page = PageInfo::first(page_size);
    let mut records = Vec::new();
    let mut entity = None;

    loop {
        query.page = Some(page.clone());
        let response = service.retrieve_multiple(&query)?;

        if response.entity.is_some() {
            entity = response.entity;
        }
        records.extend(response.records);

        if !response.more_records {
            break;
        }
        if page.number >= MAX_PAGES {
            return Err(Error::PageOverrun { pages: page.number });
        }

        page.number += 1;
        page.cookie = response.paging_cookie;
    }

    Ok(RecordSet {
        entity,
        records,
        more_records: false,
        paging_cookie: None,
    })
}

///
/// TESTS
///
