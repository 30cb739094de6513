/// Longest page list a single argument may expand to.
pub const MAX_LISTED_PAGES: usize = 100_000;

/// Parse a page list like "1,3-5" into 1-indexed page numbers.
///
/// Order and duplicates are kept, so "3,1,2" and "4-1" describe new page
/// orders. A descending range counts down. Page 0 is rejected, as is a list
/// longer than [`MAX_LISTED_PAGES`].
pub fn parse_page_list(input: &str) -> Result<Vec<u32>, String> {
    let mut pages = Vec::new();

    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        if let Some((start_str, end_str)) = part.split_once('-') {
            let start = parse_page(start_str)?;
            let end = parse_page(end_str)?;
            let span = start.abs_diff(end) as usize + 1;
            if pages.len() + span > MAX_LISTED_PAGES {
                return Err(format!(
                    "page range '{part}' is too long (at most {MAX_LISTED_PAGES} pages)"
                ));
            }

            if start <= end {
                pages.extend(start..=end);
            } else {
                pages.extend((end..=start).rev());
            }
        } else {
            if pages.len() >= MAX_LISTED_PAGES {
                return Err(format!("too many pages (at most {MAX_LISTED_PAGES})"));
            }
            pages.push(parse_page(part)?);
        }
    }

    if pages.is_empty() {
        return Err(format!("no pages in '{input}'"));
    }
    Ok(pages)
}

fn parse_page(text: &str) -> Result<u32, String> {
    let text = text.trim();
    let page: u32 = text
        .parse()
        .map_err(|_| format!("invalid page number: '{text}'"))?;
    if page == 0 {
        return Err("page 0 is invalid (pages start at 1)".to_string());
    }
    Ok(page)
}

/// Split `NAME=PAGES` into the output name and its page list.
pub fn parse_split_part(input: &str) -> Result<(String, Vec<u32>), String> {
    let (name, pages) = input
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=PAGES, got '{input}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing output name in '{input}'"));
    }
    Ok((name.to_string(), parse_page_list(pages)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_page() {
        assert_eq!(parse_page_list("1").unwrap(), vec![1]);
        assert_eq!(parse_page_list("3").unwrap(), vec![3]);
    }

    #[test]
    fn page_range() {
        assert_eq!(parse_page_list("2-4").unwrap(), vec![2, 3, 4]);
    }

    #[test]
    fn descending_range() {
        assert_eq!(parse_page_list("4-1").unwrap(), vec![4, 3, 2, 1]);
    }

    #[test]
    fn order_is_kept() {
        assert_eq!(parse_page_list("3,1,2").unwrap(), vec![3, 1, 2]);
        assert_eq!(
            parse_page_list("1-3,7,10-12").unwrap(),
            vec![1, 2, 3, 7, 10, 11, 12]
        );
    }

    #[test]
    fn duplicates_kept() {
        assert_eq!(parse_page_list("1,1,2").unwrap(), vec![1, 1, 2]);
    }

    #[test]
    fn page_zero_invalid() {
        let err = parse_page_list("0").unwrap_err();
        assert!(err.contains("invalid"));
        assert!(parse_page_list("0-2").is_err());
    }

    #[test]
    fn garbage_rejected() {
        assert!(parse_page_list("one").is_err());
        assert!(parse_page_list(",").is_err());
    }

    #[test]
    fn huge_range_rejected_before_expanding() {
        let err = parse_page_list("1-4294967295").unwrap_err();
        assert!(err.contains("too long"), "{err}");
        assert!(parse_page_list("4294967295-1").is_err());
        assert!(parse_page_list("1-60000,1-60000").is_err());
    }

    #[test]
    fn longest_allowed_range_accepted() {
        let pages = parse_page_list("1-100000").unwrap();
        assert_eq!(pages.len(), MAX_LISTED_PAGES);
        assert_eq!(pages.last(), Some(&100_000));
    }

    #[test]
    fn whitespace_tolerance() {
        assert_eq!(parse_page_list(" 1 , 3 - 5 ").unwrap(), vec![1, 3, 4, 5]);
    }

    #[test]
    fn split_part() {
        assert_eq!(
            parse_split_part("intro.pdf=1-2,5").unwrap(),
            ("intro.pdf".to_string(), vec![1, 2, 5])
        );
        assert!(parse_split_part("intro.pdf").is_err());
        assert!(parse_split_part("=1").is_err());
    }
}
