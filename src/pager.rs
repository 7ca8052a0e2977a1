use anyhow::Result;
use futures::{prelude::*, stream::LocalBoxStream};

use crate::library::Page;

/// Lazily walks a paginated listing. `fetch` is called with offset 0 first,
/// then with each page's `next` until a page has none.
///
/// A page with zero items ends the listing even when it still carries a
/// `next` offset, so a server that keeps handing out empty pages can't spin
/// the walk forever.
pub fn pages<'a, T, F, Fut>(fetch: F) -> LocalBoxStream<'a, Result<Page<T>>>
where
    T: 'a,
    F: FnMut(u32) -> Fut + 'a,
    Fut: Future<Output = Result<Page<T>>> + 'a,
{
    stream::try_unfold((fetch, Some(0)), |(mut fetch, cursor)| async move {
        let offset = match cursor {
            Some(offset) => offset,
            None => return Ok::<_, anyhow::Error>(None),
        };
        let page = fetch(offset).await?;
        log::debug!("fetched {} items at offset {}", page.items.len(), offset);
        let next = if page.items.is_empty() { None } else { page.next };
        Ok::<_, anyhow::Error>(Some((page, (fetch, next))))
    })
    .boxed_local()
}

/// Drains every page into one list, keeping listing order.
pub async fn collect_items<T>(mut pages: LocalBoxStream<'_, Result<Page<T>>>) -> Result<Vec<T>> {
    let mut items = vec![];
    while let Some(page) = pages.try_next().await? {
        items.extend(page.items);
    }
    Ok(items)
}
