//! いいね集計のドメインサービス

use crate::domain::artwork::entities::{Artwork, ArtworkId};
use std::collections::HashMap;
use tracing::debug;

/// ランキングの一行
#[derive(Debug, Clone)]
pub struct RankedArtwork {
    pub rank: u32,
    pub artwork: Artwork,
    pub like_count: usize,
}

/// いいね数からランキングを計算するサービス
pub struct RankingService;

impl RankingService {
    /// アートワークをいいね数の降順に並べる
    ///
    /// 同数の場合は展示順（表示順序、次いで作成時刻とID）を保つ。
    /// いいねが一件もないアートワークもランキングに含まれる。
    pub fn rank(
        artworks: Vec<Artwork>,
        counts: &HashMap<ArtworkId, usize>,
    ) -> Vec<RankedArtwork> {
        let mut entries: Vec<(Artwork, usize)> = artworks
            .into_iter()
            .map(|artwork| {
                let count = counts.get(&artwork.id).copied().unwrap_or(0);
                (artwork, count)
            })
            .collect();

        // いいね数の降順、同数は展示順
        entries.sort_by(|(a, a_count), (b, b_count)| {
            b_count.cmp(a_count).then_with(|| a.display_cmp(b))
        });

        debug!("ランキングを計算: {} 件", entries.len());

        entries
            .into_iter()
            .enumerate()
            .map(|(idx, (artwork, like_count))| RankedArtwork {
                rank: (idx + 1) as u32,
                artwork,
                like_count,
            })
            .collect()
    }
}
