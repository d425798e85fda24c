use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::locations::{default_locations, DEFAULT_HOME_COUNTRY, SAMPLE_TOPICS};
use super::types::{
    DiasporaLocation, DiasporaMetrics, DiasporaPost, Engagement, Influence, NarrativeFlow,
    NarrativeType, Sentiment, SentimentBreakdown, TrackedPost,
};

const SAMPLE_POSTS_PER_LOCATION: usize = 10;
const SAMPLE_WINDOW_SECS: i64 = 30 * 24 * 60 * 60;
const TOP_NARRATIVES: usize = 5;

/// Scores diaspora posts and detects narratives flowing back home.
#[derive(Debug, Clone, PartialEq)]
pub struct DiasporaTracker {
    home_country: String,
    locations: Vec<DiasporaLocation>,
}

impl Default for DiasporaTracker {
    fn default() -> Self {
        Self::new(DEFAULT_HOME_COUNTRY, default_locations())
    }
}

impl DiasporaTracker {
    pub fn new(home_country: impl Into<String>, locations: Vec<DiasporaLocation>) -> Self {
        Self {
            home_country: home_country.into(),
            locations,
        }
    }

    pub fn home_country(&self) -> &str {
        &self.home_country
    }

    pub fn locations(&self) -> &[DiasporaLocation] {
        &self.locations
    }

    pub fn location(&self, key: &str) -> Option<&DiasporaLocation> {
        self.locations.iter().find(|l| l.answers_to(key))
    }

    /// `min(100, weighted engagement / 1000 * location weight * narrative weight)`.
    ///
    /// Locations missing from the catalog, the home country included, weigh
    /// as medium.
    pub fn influence_score(&self, post: &DiasporaPost) -> f64 {
        let location_weight = self
            .location(&post.location)
            .map_or(Influence::Medium.weight(), |l| l.influence.weight());
        let score =
            post.engagement.weighted() / 1000.0 * location_weight * post.narrative_type.weight();
        score.min(100.0)
    }

    pub fn track_post(&self, post: DiasporaPost) -> TrackedPost {
        let influence_score = self.influence_score(&post);
        TrackedPost {
            post,
            influence_score,
        }
    }

    pub fn track_all(&self, posts: Vec<DiasporaPost>) -> Vec<TrackedPost> {
        posts.into_iter().map(|p| self.track_post(p)).collect()
    }

    /// Narratives whose first domestic post comes strictly after their first
    /// external post. Output is ordered by topic.
    pub fn detect_narrative_flows(&self, posts: &[TrackedPost]) -> Vec<NarrativeFlow> {
        let mut flows = Vec::new();

        for (topic, mut group) in group_by_topic(posts) {
            group.sort_by_key(|p| p.post.timestamp);

            let first = |kind: NarrativeType| group.iter().find(|p| p.post.narrative_type == kind);
            let (Some(external), Some(domestic)) =
                (first(NarrativeType::External), first(NarrativeType::Domestic))
            else {
                continue;
            };
            if domestic.post.timestamp <= external.post.timestamp {
                continue;
            }

            let origin = self
                .location(&external.post.location)
                .map_or_else(|| external.post.location.clone(), |l| l.country.clone());
            let platforms: BTreeSet<&str> =
                group.iter().map(|p| p.post.platform.as_str()).collect();

            tracing::debug!(topic, origin = %origin, posts = group.len(), "narrative re-entry");
            flows.push(NarrativeFlow {
                origin,
                destination: self.home_country.clone(),
                narrative: topic.to_string(),
                strength: flow_strength(&group),
                timeline: group.iter().map(|p| p.post.timestamp).collect(),
                platforms: platforms.into_iter().map(str::to_string).collect(),
            });
        }

        flows
    }

    pub fn metrics(&self, posts: &[TrackedPost]) -> DiasporaMetrics {
        let total_population = self
            .locations
            .iter()
            .fold(0u64, |sum, l| sum.saturating_add(l.population));
        let active_users = posts
            .iter()
            .map(|p| p.post.author.as_str())
            .collect::<BTreeSet<_>>()
            .len();

        let engagement_rate = if active_users == 0 || posts.is_empty() {
            0.0
        } else {
            total_engagement(posts.iter()) as f64 / (active_users as f64 * posts.len() as f64)
                * 100.0
        };

        DiasporaMetrics {
            total_population,
            active_users,
            engagement_rate,
            top_narratives: top_narratives(posts),
            sentiment_breakdown: sentiment_breakdown(posts),
            cross_border_flows: self.detect_narrative_flows(posts),
            influence_index: mean_influence(posts),
        }
    }

    /// Ten synthetic posts per catalog location, dated within the 30 days
    /// before `now`.
    pub fn sample_posts<R: Rng + ?Sized>(
        &self,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Vec<TrackedPost> {
        let mut posts = Vec::with_capacity(self.locations.len() * SAMPLE_POSTS_PER_LOCATION);

        for location in &self.locations {
            for i in 0..SAMPLE_POSTS_PER_LOCATION {
                let platform = location
                    .social_platforms
                    .choose(rng)
                    .cloned()
                    .unwrap_or_default();
                let sentiment = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral]
                    [rng.gen_range(0..3)];
                let topic = SAMPLE_TOPICS[rng.gen_range(0..SAMPLE_TOPICS.len())];
                let narrative_type = if rng.gen::<f64>() > 0.7 {
                    NarrativeType::External
                } else if rng.gen::<f64>() > 0.4 {
                    NarrativeType::Domestic
                } else {
                    NarrativeType::Hybrid
                };

                let post = DiasporaPost {
                    id: format!("diaspora-{}-{}", location.country_code.to_lowercase(), i),
                    location: location.country.clone(),
                    platform,
                    content: format!(
                        "Sample post about {} politics from {}",
                        self.home_country, location.country
                    ),
                    author: format!("User_{}_{}", location.country_code, i),
                    timestamp: now - Duration::seconds(rng.gen_range(0..SAMPLE_WINDOW_SECS)),
                    engagement: Engagement {
                        likes: rng.gen_range(0..500),
                        shares: rng.gen_range(0..100),
                        comments: rng.gen_range(0..200),
                    },
                    sentiment,
                    topics: vec![topic.to_string()],
                    narrative_type,
                };
                posts.push(self.track_post(post));
            }
        }

        posts
    }
}

/// Detect flows against the default Albanian catalog.
pub fn detect_narrative_flows(posts: &[TrackedPost]) -> Vec<NarrativeFlow> {
    DiasporaTracker::default().detect_narrative_flows(posts)
}

/// Posts per topic. A post listing a topic twice is counted once.
fn group_by_topic(posts: &[TrackedPost]) -> BTreeMap<&str, Vec<&TrackedPost>> {
    let mut groups: BTreeMap<&str, Vec<&TrackedPost>> = BTreeMap::new();
    for post in posts {
        for topic in &post.post.topics {
            let group = groups.entry(topic.as_str()).or_default();
            if !group.last().is_some_and(|last| std::ptr::eq(*last, post)) {
                group.push(post);
            }
        }
    }
    groups
}

/// `min(100, total engagement / 10000 * mean influence / 50)`.
fn flow_strength(group: &[&TrackedPost]) -> f64 {
    if group.is_empty() {
        return 0.0;
    }
    let total = total_engagement(group.iter().copied());
    let mean = group.iter().map(|p| p.influence_score).sum::<f64>() / group.len() as f64;
    (total as f64 / 10_000.0 * (mean / 50.0)).min(100.0)
}

fn total_engagement<'a>(posts: impl Iterator<Item = &'a TrackedPost>) -> u64 {
    posts.fold(0, |sum, p| sum.saturating_add(p.post.engagement.total()))
}

fn mean_influence(posts: &[TrackedPost]) -> f64 {
    if posts.is_empty() {
        return 0.0;
    }
    posts.iter().map(|p| p.influence_score).sum::<f64>() / posts.len() as f64
}

fn sentiment_breakdown(posts: &[TrackedPost]) -> SentimentBreakdown {
    if posts.is_empty() {
        return SentimentBreakdown::default();
    }
    let share = |s: Sentiment| {
        posts.iter().filter(|p| p.post.sentiment == s).count() as f64 / posts.len() as f64 * 100.0
    };
    SentimentBreakdown {
        positive: share(Sentiment::Positive),
        negative: share(Sentiment::Negative),
        neutral: share(Sentiment::Neutral),
    }
}

/// Most mentioned topics, ties broken alphabetically.
fn top_narratives(posts: &[TrackedPost]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for post in posts {
        for topic in &post.post.topics {
            *counts.entry(topic.as_str()).or_insert(0) += 1;
        }
    }
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(TOP_NARRATIVES)
        .map(|(topic, _)| topic.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn post(
        topic: &str,
        kind: NarrativeType,
        location: &str,
        secs: i64,
        likes: u64,
    ) -> DiasporaPost {
        DiasporaPost {
            id: String::new(),
            location: location.to_string(),
            platform: "Facebook".to_string(),
            content: String::new(),
            author: format!("{}-{}", location, secs),
            timestamp: at(secs),
            engagement: Engagement {
                likes,
                shares: 0,
                comments: 0,
            },
            sentiment: Sentiment::Neutral,
            topics: vec![topic.to_string()],
            narrative_type: kind,
        }
    }

    fn track(posts: Vec<DiasporaPost>) -> Vec<TrackedPost> {
        DiasporaTracker::default().track_all(posts)
    }

    #[test]
    fn test_influence_score() {
        let tracker = DiasporaTracker::default();
        let italy = post("Economy", NarrativeType::External, "Italy", 0, 1000);
        assert!((tracker.influence_score(&italy) - 1.35).abs() < 1e-9);

        let canada = post("Economy", NarrativeType::Hybrid, "CA", 0, 1000);
        assert!((tracker.influence_score(&canada) - 0.91).abs() < 1e-9);

        let home = post("Economy", NarrativeType::Domestic, "Albania", 0, 1000);
        assert_eq!(tracker.influence_score(&home), 1.0);

        let viral = post("Economy", NarrativeType::Hybrid, "Italy", 0, 10_000_000);
        assert_eq!(tracker.influence_score(&viral), 100.0);
    }

    #[test]
    fn test_external_only_not_flagged() {
        let posts = track(vec![
            post("Migration", NarrativeType::External, "Italy", 0, 100),
            post("Migration", NarrativeType::External, "Greece", 10, 100),
        ]);
        assert!(detect_narrative_flows(&posts).is_empty());
    }

    #[test]
    fn test_external_then_domestic_flagged() {
        let posts = track(vec![
            post("Corruption", NarrativeType::External, "Italy", 0, 10_000),
            post("Corruption", NarrativeType::Domestic, "Albania", 1, 10_000),
        ]);
        let flows = detect_narrative_flows(&posts);
        assert_eq!(flows.len(), 1);
        let flow = &flows[0];
        assert_eq!(flow.origin, "Italy");
        assert_eq!(flow.destination, "Albania");
        assert_eq!(flow.narrative, "Corruption");
        assert_eq!(flow.timeline, vec![at(0), at(1)]);
        assert_eq!(flow.platforms, vec!["Facebook".to_string()]);
        // 20000 / 10000 * ((13.5 + 10) / 2 / 50)
        assert!((flow.strength - 0.47).abs() < 1e-9);
    }

    #[test]
    fn test_domestic_then_external_not_flagged() {
        let posts = track(vec![
            post("Corruption", NarrativeType::Domestic, "Albania", 0, 100),
            post("Corruption", NarrativeType::External, "Italy", 1, 100),
        ]);
        assert!(detect_narrative_flows(&posts).is_empty());
    }

    #[test]
    fn test_input_order_irrelevant() {
        let posts = track(vec![
            post("Tourism", NarrativeType::Domestic, "Albania", 50, 100),
            post("Tourism", NarrativeType::External, "DE", 20, 100),
            post("Tourism", NarrativeType::External, "Italy", 5, 100),
        ]);
        let flows = detect_narrative_flows(&posts);
        assert_eq!(flows.len(), 1);
        assert_eq!(flows[0].origin, "Italy");
        assert_eq!(flows[0].timeline, vec![at(5), at(20), at(50)]);
    }

    #[test]
    fn test_simultaneous_posts_not_flagged() {
        let posts = track(vec![
            post("Elections", NarrativeType::External, "Italy", 7, 100),
            post("Elections", NarrativeType::Domestic, "Albania", 7, 100),
        ]);
        assert!(detect_narrative_flows(&posts).is_empty());
    }

    #[test]
    fn test_hybrid_posts_do_not_count_as_either_side() {
        let posts = track(vec![
            post("Economy", NarrativeType::Hybrid, "Italy", 0, 100),
            post("Economy", NarrativeType::Domestic, "Albania", 1, 100),
        ]);
        assert!(detect_narrative_flows(&posts).is_empty());
    }

    #[test]
    fn test_flows_ordered_by_topic() {
        let posts = track(vec![
            post("Tourism", NarrativeType::External, "Italy", 0, 100),
            post("Tourism", NarrativeType::Domestic, "Albania", 1, 100),
            post("Economy", NarrativeType::External, "Greece", 0, 100),
            post("Economy", NarrativeType::Domestic, "Albania", 1, 100),
        ]);
        let names: Vec<_> = detect_narrative_flows(&posts)
            .into_iter()
            .map(|f| f.narrative)
            .collect();
        assert_eq!(names, vec!["Economy", "Tourism"]);
    }

    #[test]
    fn test_metrics_empty() {
        let metrics = DiasporaTracker::default().metrics(&[]);
        assert_eq!(metrics.total_population, 1_770_000);
        assert_eq!(metrics.active_users, 0);
        assert_eq!(metrics.engagement_rate, 0.0);
        assert_eq!(metrics.influence_index, 0.0);
        assert_eq!(metrics.sentiment_breakdown, SentimentBreakdown::default());
        assert!(metrics.top_narratives.is_empty());
        assert!(metrics.cross_border_flows.is_empty());
    }

    #[test]
    fn test_metrics() {
        let mut a = post("Economy", NarrativeType::External, "Italy", 0, 300);
        a.sentiment = Sentiment::Positive;
        let mut b = post("Economy", NarrativeType::Domestic, "Albania", 5, 100);
        b.sentiment = Sentiment::Negative;
        let c = post("Tourism", NarrativeType::External, "Greece", 9, 200);
        let posts = track(vec![a, b, c]);

        let metrics = DiasporaTracker::default().metrics(&posts);
        assert_eq!(metrics.active_users, 3);
        // 600 / (3 * 3) * 100
        assert!((metrics.engagement_rate - 6000.0 / 9.0).abs() < 1e-9);
        assert_eq!(metrics.top_narratives, vec!["Economy", "Tourism"]);
        assert!((metrics.sentiment_breakdown.positive - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(metrics.cross_border_flows.len(), 1);
    }

    #[test]
    fn test_huge_engagement_saturates() {
        let mut external = post("Economy", NarrativeType::External, "Italy", 0, u64::MAX);
        external.engagement.shares = u64::MAX;
        let domestic = post("Economy", NarrativeType::Domestic, "Albania", 1, u64::MAX);
        let posts = track(vec![external, domestic]);

        let flows = detect_narrative_flows(&posts);
        assert_eq!(flows.len(), 1);
        assert_eq!(flows[0].strength, 100.0);

        let metrics = DiasporaTracker::default().metrics(&posts);
        assert!(metrics.engagement_rate.is_finite());
        assert!(metrics.engagement_rate > 0.0);
        assert_eq!(metrics.influence_index, 100.0);
    }

    #[test]
    fn test_sample_posts_reproducible() {
        let tracker = DiasporaTracker::default();
        let now = at(0);
        let a = tracker.sample_posts(now, &mut StdRng::seed_from_u64(11));
        let b = tracker.sample_posts(now, &mut StdRng::seed_from_u64(11));
        assert_eq!(a.len(), 70);
        assert_eq!(a, b);
        for p in &a {
            assert!(p.post.timestamp <= now);
            assert!(p.post.timestamp > now - Duration::days(30));
            assert!(p.influence_score >= 0.0 && p.influence_score <= 100.0);
            let loc = tracker.location(&p.post.location).unwrap();
            assert!(loc.social_platforms.contains(&p.post.platform));
        }
    }
}
