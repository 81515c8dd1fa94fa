//! View - 一覧表示用のフィルタとソート
//!
//! Task Store の read view は「フィルタ → 安定ソート」の純粋関数です。
//! ソート条件が一致する要素同士は挿入順のまま残ります。

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::errors::TodoError;
use crate::domain::task::Task;

/// 並び順
///
/// 設定値として未知の文字列が来た場合は `Unsorted`（挿入順のまま）になります。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// `due_at` の昇順
    #[default]
    Date,
    /// `priority` の降順（high が先）
    Priority,
    /// category label の辞書順
    Category,
    #[serde(other)]
    Unsorted,
}

impl SortBy {
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::Date => "date",
            SortBy::Priority => "priority",
            SortBy::Category => "category",
            SortBy::Unsorted => "unsorted",
        }
    }
}

impl FromStr for SortBy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "date" => SortBy::Date,
            "priority" => SortBy::Priority,
            "category" => SortBy::Category,
            _ => SortBy::Unsorted,
        })
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// カテゴリ絞り込み（`"all"` またはカテゴリ label）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = TodoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.to_string()
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => f.write_str(category.label()),
        }
    }
}

/// `tasks` を絞り込んで並べ替えたコピーを返す
pub fn filter_and_sort<'a, I>(
    tasks: I,
    show_completed: bool,
    category: CategoryFilter,
    sort_by: SortBy,
) -> Vec<Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut items: Vec<Task> = tasks
        .into_iter()
        .filter(|t| show_completed || !t.is_completed)
        .filter(|t| category.matches(t.category))
        .cloned()
        .collect();

    // sort_by / sort_by_key は安定ソート
    match sort_by {
        SortBy::Date => items.sort_by_key(|t| t.due_at),
        SortBy::Priority => items.sort_by(|a, b| b.priority.cmp(&a.priority)),
        SortBy::Category => items.sort_by(|a, b| a.category.label().cmp(b.category.label())),
        SortBy::Unsorted => {}
    }

    items
}
