use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rating_store::{ItemId, RatingScale, RatingStore, UserId, sample_store_with_scale};
use recommender::{
    Prediction, PredictionBasis, Predictor, RatingPredictor, Recommendation, Recommender,
};
use serde::Serialize;
use similarity::{ItemSimilarityMatrix, NormScope, SimilarityEngine};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// item-recs - Item-based collaborative filtering recommender
#[derive(Parser, Debug)]
#[command(name = "item-recs")]
#[command(about = "Recommend items from item-to-item rating similarity", long_about = None)]
struct Cli {
    /// Ratings file (`user::item::rating` per line); uses the built-in sample when omitted
    #[arg(short, long)]
    ratings: Option<PathBuf>,

    /// Lowest accepted rating
    #[arg(long, default_value = "1.0")]
    min_rating: f64,

    /// Highest accepted rating
    #[arg(long, default_value = "5.0")]
    max_rating: f64,

    /// Which raters contribute to the cosine norms
    #[arg(long, value_enum, default_value = "all-raters")]
    norm_scope: NormScopeArg,

    /// Keep only item pairs scoring strictly above this
    #[arg(long, default_value = "0.0")]
    min_similarity: f64,

    /// Print JSON instead of formatted text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get item recommendations for a user
    Recommend {
        /// User ID to get recommendations for
        #[arg(long)]
        user_id: UserId,

        /// Number of recommendations to return
        #[arg(long, default_value = "5")]
        top_n: usize,

        /// Show how each prediction was obtained
        #[arg(long)]
        explain: bool,
    },

    /// Predict a single user's rating of an item
    Predict {
        #[arg(long)]
        user_id: UserId,

        #[arg(long)]
        item_id: ItemId,
    },

    /// List the items most similar to an item
    Similar {
        #[arg(long)]
        item_id: ItemId,

        /// Maximum number of neighbors to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Show store and similarity matrix statistics
    Stats,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum NormScopeArg {
    AllRaters,
    CoRaters,
}

impl From<NormScopeArg> for NormScope {
    fn from(arg: NormScopeArg) -> Self {
        match arg {
            NormScopeArg::AllRaters => NormScope::AllRaters,
            NormScopeArg::CoRaters => NormScope::CoRaters,
        }
    }
}

#[derive(Serialize, Debug)]
struct PredictionOutput {
    user_id: UserId,
    item_id: ItemId,
    #[serde(flatten)]
    prediction: Prediction,
}

#[derive(Serialize, Debug, PartialEq)]
struct Neighbor {
    item_id: ItemId,
    similarity: f64,
}

#[derive(Serialize, Debug, PartialEq)]
struct Stats {
    users: usize,
    items: usize,
    ratings: usize,
    similar_pairs: usize,
    global_average: f64,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let store = Arc::new(load_store(&cli)?);
    let (users, items, ratings) = store.counts();
    info!(users, items, ratings, "Rating store ready");

    let start = Instant::now();
    let engine = SimilarityEngine::new(store.clone())
        .with_norm_scope(cli.norm_scope.into())
        .with_min_similarity(cli.min_similarity);
    let matrix = engine.compute_all();
    info!(
        pairs = matrix.pair_count(),
        "Computed item similarities in {:?}",
        start.elapsed()
    );

    match cli.command {
        Commands::Recommend {
            user_id,
            top_n,
            explain,
        } => handle_recommend(store, &matrix, user_id, top_n, explain, cli.json)?,
        Commands::Predict { user_id, item_id } => {
            handle_predict(store, &matrix, user_id, item_id, cli.json)?
        }
        Commands::Similar { item_id, limit } => handle_similar(&matrix, item_id, limit, cli.json)?,
        Commands::Stats => handle_stats(&store, &matrix, cli.json)?,
    }

    Ok(())
}

/// Ingestion: a ratings file when given, otherwise the sample dataset
fn load_store(cli: &Cli) -> Result<RatingStore> {
    let scale = RatingScale::new(cli.min_rating, cli.max_rating);
    match &cli.ratings {
        Some(path) => RatingStore::load_from_file(path, scale)
            .with_context(|| format!("Failed to load ratings from {}", path.display())),
        None => {
            warn!("No ratings file given, using the built-in sample dataset");
            sample_store_with_scale(scale)
                .context("Sample dataset does not fit the requested rating scale")
        }
    }
}

/// Handle the 'recommend' command
fn handle_recommend(
    store: Arc<RatingStore>,
    matrix: &ItemSimilarityMatrix,
    user_id: UserId,
    top_n: usize,
    explain: bool,
    json: bool,
) -> Result<()> {
    if store.ratings_by_user(user_id).is_empty() {
        warn!("User {} has no ratings; predictions use the global average", user_id);
    }

    let recommendations = Recommender::new(store).recommend(user_id, top_n, matrix);

    if json {
        return print_json(&recommendations);
    }
    print_recommendations(user_id, &recommendations, explain);
    Ok(())
}

/// Handle the 'predict' command
fn handle_predict(
    store: Arc<RatingStore>,
    matrix: &ItemSimilarityMatrix,
    user_id: UserId,
    item_id: ItemId,
    json: bool,
) -> Result<()> {
    let existing = store.rating(user_id, item_id);
    let prediction = Predictor::new(store).predict(user_id, item_id, matrix);

    if json {
        return print_json(&PredictionOutput {
            user_id,
            item_id,
            prediction,
        });
    }

    println!(
        "{}",
        format!("Prediction for user {} on item {}:", user_id, item_id)
            .bold()
            .blue()
    );
    println!("{}Predicted rating: {:.4}", "• ".green(), prediction.value);
    println!("{}Basis: {}", "• ".green(), describe_basis(prediction.basis));
    if let Some(actual) = existing {
        println!("{}Actual rating: {:.1}", "• ".cyan(), actual);
    }
    Ok(())
}

/// Handle the 'similar' command
fn handle_similar(
    matrix: &ItemSimilarityMatrix,
    item_id: ItemId,
    limit: usize,
    json: bool,
) -> Result<()> {
    let neighbors = similar_items(matrix, item_id, limit);

    if json {
        return print_json(&neighbors);
    }

    println!("{}", format!("Items similar to {}:", item_id).bold().blue());
    if neighbors.is_empty() {
        println!("  (no similar items)");
    }
    for (rank, neighbor) in neighbors.iter().enumerate() {
        println!(
            "{}. Item {} -> similarity {:.4}",
            (rank + 1).to_string().green(),
            neighbor.item_id,
            neighbor.similarity
        );
    }
    Ok(())
}

/// Handle the 'stats' command
fn handle_stats(store: &RatingStore, matrix: &ItemSimilarityMatrix, json: bool) -> Result<()> {
    let stats = collect_stats(store, matrix);

    if json {
        return print_json(&stats);
    }

    println!("{}", "Dataset statistics:".bold().blue());
    println!("{}Users: {}", "• ".green(), stats.users);
    println!("{}Items: {}", "• ".green(), stats.items);
    println!("{}Ratings: {}", "• ".green(), stats.ratings);
    println!("{}Similar item pairs: {}", "• ".cyan(), stats.similar_pairs);
    println!("{}Global average rating: {:.4}", "• ".cyan(), stats.global_average);
    Ok(())
}

fn similar_items(matrix: &ItemSimilarityMatrix, item_id: ItemId, limit: usize) -> Vec<Neighbor> {
    matrix
        .most_similar(item_id, limit)
        .into_iter()
        .map(|(item_id, similarity)| Neighbor {
            item_id,
            similarity,
        })
        .collect()
}

fn collect_stats(store: &RatingStore, matrix: &ItemSimilarityMatrix) -> Stats {
    let (users, items, ratings) = store.counts();
    Stats {
        users,
        items,
        ratings,
        similar_pairs: matrix.pair_count(),
        global_average: store.global_average(),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}

fn describe_basis(basis: PredictionBasis) -> String {
    match basis {
        PredictionBasis::Neighborhood { neighbors } => {
            format!("weighted average over {} similar rated items", neighbors)
        }
        PredictionBasis::UserAverage => {
            "user's average rating (no similar rated items)".to_string()
        }
        PredictionBasis::GlobalAverage => "global average rating (user has no ratings)".to_string(),
    }
}

/// Helper function to format and print recommendations
fn print_recommendations(user_id: UserId, recommendations: &[Recommendation], explain: bool) {
    println!(
        "{}",
        format!("Top {} recommendations for user {}:", recommendations.len(), user_id)
            .bold()
            .blue()
    );
    if recommendations.is_empty() {
        println!("  (nothing left to recommend)");
    }
    for (rank, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. Item {} -> predicted rating {:.4}",
            (rank + 1).to_string().green(),
            rec.item_id,
            rec.predicted_rating
        );
        if explain {
            println!("   Basis: {}", describe_basis(rec.basis));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_matrix() -> (Arc<RatingStore>, ItemSimilarityMatrix) {
        let store = Arc::new(rating_store::sample_store());
        let matrix = SimilarityEngine::new(store.clone()).compute_all();
        (store, matrix)
    }

    #[test]
    fn test_parse_recommend() {
        let cli = Cli::try_parse_from(["item-recs", "recommend", "--user-id", "3"]).unwrap();

        assert!(cli.ratings.is_none());
        assert_eq!(cli.norm_scope, NormScopeArg::AllRaters);
        assert_eq!(cli.min_similarity, 0.0);
        match cli.command {
            Commands::Recommend {
                user_id,
                top_n,
                explain,
            } => {
                assert_eq!(user_id, 3);
                assert_eq!(top_n, 5);
                assert!(!explain);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_options() {
        let cli = Cli::try_parse_from([
            "item-recs",
            "--norm-scope",
            "co-raters",
            "--json",
            "similar",
            "--item-id",
            "101",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(NormScope::from(cli.norm_scope), NormScope::CoRaters);
        assert!(matches!(cli.command, Commands::Similar { item_id: 101, limit: 10 }));
    }

    #[test]
    fn test_parse_requires_user() {
        assert!(Cli::try_parse_from(["item-recs", "recommend"]).is_err());
    }

    #[test]
    fn test_load_store_defaults_to_sample() {
        let cli = Cli::try_parse_from(["item-recs", "stats"]).unwrap();
        let store = load_store(&cli).unwrap();
        assert_eq!(store.counts(), (6, 7, 24));
    }

    #[test]
    fn test_load_store_sample_honors_scale() {
        let cli = Cli::try_parse_from(["item-recs", "--min-rating", "3.0", "stats"]).unwrap();
        let err = load_store(&cli).unwrap_err();
        assert!(err.to_string().contains("rating scale"));

        let cli = Cli::try_parse_from(["item-recs", "--max-rating", "10", "stats"]).unwrap();
        let store = load_store(&cli).unwrap();
        assert_eq!(store.scale(), RatingScale::new(1.0, 10.0));
    }

    #[test]
    fn test_load_store_missing_file() {
        let cli =
            Cli::try_parse_from(["item-recs", "--ratings", "no/such/file.dat", "stats"]).unwrap();
        let err = load_store(&cli).unwrap_err();
        assert!(err.to_string().contains("no/such/file.dat"));
    }

    #[test]
    fn test_collect_stats() {
        let (store, matrix) = sample_matrix();
        let stats = collect_stats(&store, &matrix);

        assert_eq!(stats.users, 6);
        assert_eq!(stats.items, 7);
        assert_eq!(stats.ratings, 24);
        assert_eq!(stats.similar_pairs, 18);
        assert!((stats.global_average - 3.4375).abs() < 1e-12);
    }

    #[test]
    fn test_similar_items_limit() {
        let (_, matrix) = sample_matrix();
        let neighbors = similar_items(&matrix, 106, 2);

        assert_eq!(neighbors.len(), 2);
        assert!(neighbors[0].similarity >= neighbors[1].similarity);
        // 106 neighbors: 104 (0.641), 101 (0.601), 103 (0.386)
        assert_eq!(neighbors[0].item_id, 104);
        assert_eq!(neighbors[1].item_id, 101);
    }
}
