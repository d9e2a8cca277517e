//! Paged reads over the store

/// Read every row by calling `fetch_page(offset, limit)` until a page comes
/// back shorter than `page_size`.
///
/// A `page_size` of zero is read as one.
///
/// # Examples
///
/// ```
/// use parentele_recompute::fetch_all_paged;
///
/// let data: Vec<u32> = (0..7).collect();
/// let all = fetch_all_paged(3, |offset, limit| -> Result<Vec<u32>, String> {
///     Ok(data.iter().skip(offset).take(limit).copied().collect())
/// })
/// .unwrap();
/// assert_eq!(all, data);
/// ```
pub fn fetch_all_paged<T, E, F>(page_size: usize, mut fetch_page: F) -> Result<Vec<T>, E>
where
    F: FnMut(usize, usize) -> Result<Vec<T>, E>,
{
    let page_size = page_size.max(1);
    let mut all = Vec::new();
    let mut offset = 0;

    loop {
        let page = fetch_page(offset, page_size)?;
        let len = page.len();
        all.extend(page);
        if len < page_size {
            break;
        }
        offset += len;
    }

    Ok(all)
}
