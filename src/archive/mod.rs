//! Archive view - year filter and year-month grouping

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::content::Post;

/// Year selection of the archive page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArchiveFilter {
    #[default]
    All,
    Year(i32),
}

impl ArchiveFilter {
    pub fn matches(&self, post: &Post) -> bool {
        match self {
            ArchiveFilter::All => true,
            ArchiveFilter::Year(year) => post.year() == *year,
        }
    }
}

impl FromStr for ArchiveFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(ArchiveFilter::All);
        }
        s.parse::<i32>()
            .map(ArchiveFilter::Year)
            .map_err(|_| format!("expected `all` or a year, got `{}`", s))
    }
}

impl fmt::Display for ArchiveFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveFilter::All => write!(f, "all"),
            ArchiveFilter::Year(year) => write!(f, "{}", year),
        }
    }
}

/// One `YYYY-MM` bucket of the archive
#[derive(Debug, Clone)]
pub struct ArchiveMonth<'a> {
    pub key: String,
    pub posts: Vec<&'a Post>,
}

impl ArchiveMonth<'_> {
    /// Human readable label, e.g. "March 2024"
    pub fn label(&self) -> String {
        match self.key.split_once('-') {
            Some((year, month)) => format!("{} {}", month_name(month), year),
            None => self.key.clone(),
        }
    }
}

/// Keep only the posts picked by `selection`, preserving order
pub fn filter<'a>(posts: &[&'a Post], selection: ArchiveFilter) -> Vec<&'a Post> {
    posts.iter().copied().filter(|p| selection.matches(p)).collect()
}

/// Group posts into `YYYY-MM` buckets.
///
/// Buckets come back newest first; posts inside a bucket are sorted by date
/// descending.
pub fn group_by_month<'a>(posts: &[&'a Post]) -> Vec<ArchiveMonth<'a>> {
    let mut buckets: BTreeMap<String, Vec<&'a Post>> = BTreeMap::new();

    for &post in posts {
        buckets.entry(post.year_month()).or_default().push(post);
    }

    buckets
        .into_iter()
        .rev()
        .map(|(key, mut posts)| {
            posts.sort_by(|a, b| b.date.cmp(&a.date));
            ArchiveMonth { key, posts }
        })
        .collect()
}

/// Distinct publication years, newest first
pub fn years(posts: &[&Post]) -> Vec<i32> {
    let mut years: Vec<i32> = posts.iter().map(|p| p.year()).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

/// Convert month number to name
fn month_name(month: &str) -> &'static str {
    match month {
        "01" => "January",
        "02" => "February",
        "03" => "March",
        "04" => "April",
        "05" => "May",
        "06" => "June",
        "07" => "July",
        "08" => "August",
        "09" => "September",
        "10" => "October",
        "11" => "November",
        "12" => "December",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::test_post;

    fn sample() -> Vec<Post> {
        vec![
            test_post(1, "2024-03-20", &[]),
            test_post(2, "2024-03-19", &[]),
            test_post(3, "2024-03-21", &[]),
            test_post(4, "2024-11-12", &[]),
            test_post(5, "2023-12-31", &[]),
        ]
    }

    #[test]
    fn test_group_by_month() {
        let posts = sample();
        let refs: Vec<&Post> = posts.iter().collect();
        let months = group_by_month(&refs);

        let keys: Vec<&str> = months.iter().map(|m| m.key.as_str()).collect();
        assert_eq!(keys, vec!["2024-11", "2024-03", "2023-12"]);

        let march: Vec<u32> = months[1].posts.iter().map(|p| p.id.0).collect();
        assert_eq!(march, vec![3, 1, 2]);
        assert_eq!(months[1].label(), "March 2024");
    }

    #[test]
    fn test_filter_by_year() {
        let posts = sample();
        let refs: Vec<&Post> = posts.iter().collect();

        assert_eq!(filter(&refs, ArchiveFilter::All).len(), 5);

        let only_2023 = filter(&refs, ArchiveFilter::Year(2023));
        assert_eq!(only_2023.len(), 1);
        assert_eq!(only_2023[0].id.0, 5);

        assert!(filter(&refs, ArchiveFilter::Year(2020)).is_empty());
    }

    #[test]
    fn test_years() {
        let posts = sample();
        let refs: Vec<&Post> = posts.iter().collect();
        assert_eq!(years(&refs), vec![2024, 2023]);
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!("all".parse::<ArchiveFilter>().unwrap(), ArchiveFilter::All);
        assert_eq!(
            "2024".parse::<ArchiveFilter>().unwrap(),
            ArchiveFilter::Year(2024)
        );
        assert!("last year".parse::<ArchiveFilter>().is_err());
        assert_eq!(ArchiveFilter::Year(2024).to_string(), "2024");
    }

    #[test]
    fn test_group_empty() {
        assert!(group_by_month(&[]).is_empty());
    }
}
