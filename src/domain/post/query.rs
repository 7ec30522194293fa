use super::model::{normalize_category, PageRequest, Post};
use chrono::{DateTime, Datelike, Utc};
use std::collections::BTreeMap;

pub fn filter_visible(posts: Vec<Post>, include_unpublished: bool, now: DateTime<Utc>) -> Vec<Post> {
    posts
        .into_iter()
        .filter(|p| p.is_visible(include_unpublished, now))
        .collect()
}

/// Newest first. Stable, so equal dates keep their load order.
pub fn sort_recent_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
}

pub fn paginate(posts: Vec<Post>, page: PageRequest) -> Vec<Post> {
    if !page.is_paged() {
        return posts;
    }

    posts
        .into_iter()
        .skip(page.offset())
        .take(page.page_size as usize)
        .collect()
}

/// Published posts immediately before and after `cutoff`
pub fn neighbours(posts: &[Post], cutoff: DateTime<Utc>) -> (Option<Post>, Option<Post>) {
    let previous = posts
        .iter()
        .filter(|p| p.is_published && p.pub_date < cutoff)
        .max_by_key(|p| p.pub_date)
        .cloned();

    let next = posts
        .iter()
        .filter(|p| p.is_published && p.pub_date > cutoff)
        .min_by_key(|p| p.pub_date)
        .cloned();

    (previous, next)
}

pub fn category_frequency(posts: &[Post]) -> BTreeMap<String, usize> {
    posts
        .iter()
        .flat_map(|p| p.categories.iter())
        .map(|c| normalize_category(c))
        .filter(|c| !c.is_empty())
        .fold(BTreeMap::new(), |mut acc, category| {
            *acc.entry(category).or_insert(0) += 1;
            acc
        })
}

pub fn archive_key(date: DateTime<Utc>) -> String {
    format!("{}/{:02}", date.year(), date.month())
}

pub fn archive_frequency(posts: &[Post]) -> BTreeMap<String, usize> {
    posts.iter().fold(BTreeMap::new(), |mut acc, p| {
        *acc.entry(archive_key(p.pub_date)).or_insert(0) += 1;
        acc
    })
}
