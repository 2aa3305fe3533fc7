//! The four checks of a validation run.
//!
//! Each check records its measurements and expectations on a
//! [`CheckResult`]. Expectations that do not hold become failures; lookup
//! errors (an id missing from the table) are returned as `Err`.

use crate::report::CheckResult;
use anyhow::{Context, Result};
use data_loader::RatingTable;
use recommender::generate_recommendations;
use similarity::{cosine_similarity, item_similarity, user_similarity, within_unit_range};
use std::collections::HashSet;

/// Reference vectors for the cosine check
pub const VECTOR_A: [f64; 4] = [1.0, 2.0, 3.0, 4.0];
pub const VECTOR_B: [f64; 4] = [2.0, 3.0, 4.0, 5.0];
pub const VECTOR_C: [f64; 4] = [1.0, 1.0, 1.0, 1.0];

/// Test 1: cosine similarity of the reference vectors
pub fn check_cosine_similarity() -> CheckResult {
    let mut check = CheckResult::new(
        1,
        "Cosine Similarity Calculation",
        "Cosine similarity calculations are correct",
    );

    let sim_ab = check.measure("Similarity(A, B)", cosine_similarity(&VECTOR_A, &VECTOR_B));
    let sim_ac = check.measure("Similarity(A, C)", cosine_similarity(&VECTOR_A, &VECTOR_C));
    check.measure("Similarity(B, C)", cosine_similarity(&VECTOR_B, &VECTOR_C));

    check.expect(0.98 < sim_ab && sim_ab < 1.0, "A and B should be very similar");
    check.expect(0.85 < sim_ac && sim_ac < 0.95, "A and C should be similar");
    check.expect(sim_ab > sim_ac, "A should be more similar to B than to C");
    check
}

/// Test 2: user-user similarity on the sample table
pub fn check_user_similarity(table: &RatingTable) -> Result<CheckResult> {
    let mut check = CheckResult::new(
        2,
        "User-Based CF Logic",
        "User-based similarity calculations are correct",
    );

    let sim_u1_u2 = check.measure(
        "Similarity(User1, User2)",
        user_similarity(table, "user1", "user2")?,
    );
    let sim_u1_u3 = check.measure(
        "Similarity(User1, User3)",
        user_similarity(table, "user1", "user3")?,
    );

    check.expect(sim_u1_u2 > 0.95, "User1 and User2 should be very similar");
    check.expect(
        sim_u1_u3 < sim_u1_u2,
        "User1 should be more similar to User2 than User3",
    );
    check.expect(
        user_similarity(table, "user2", "user1")? == sim_u1_u2,
        "User similarity should be symmetric",
    );
    Ok(check)
}

/// Test 3: item-item similarity on the transposed sample table
pub fn check_item_similarity(table: &RatingTable) -> Result<CheckResult> {
    let mut check = CheckResult::new(
        3,
        "Item-Based CF Logic",
        "Item-based similarity calculations are correct",
    );

    let sim_a_b = check.measure(
        "Similarity(Item_A, Item_B)",
        item_similarity(table, "item_a", "item_b")?,
    );
    let sim_a_c = check.measure(
        "Similarity(Item_A, Item_C)",
        item_similarity(table, "item_a", "item_c")?,
    );

    check.expect(
        within_unit_range(sim_a_b) && within_unit_range(sim_a_c),
        "Item similarities should lie in [-1, 1]",
    );
    check.expect(
        item_similarity(table, "item_b", "item_a")? == sim_a_b,
        "Item similarity should be symmetric",
    );
    check.expect(
        item_similarity(table, "item_c", "item_d")? == 0.0,
        "Items without common users should have zero similarity",
    );
    Ok(check)
}

/// Test 4: user-based recommendations for user1 with K = 2
pub fn check_recommendations(table: &RatingTable) -> Result<CheckResult> {
    let mut check = CheckResult::new(
        4,
        "Recommendation Generation Logic",
        "Recommendation generation logic is correct",
    );

    let recs = generate_recommendations(table, "user1", 2)
        .context("Failed to generate recommendations for user1")?;

    let listed: Vec<String> = recs.iter().map(ToString::to_string).collect();
    check.note(format!("Recommendations for User1: [{}]", listed.join(", ")));

    let recommended: HashSet<&str> = recs.iter().map(|r| r.item_id.as_str()).collect();
    let user1_items = table.rated_items("user1")?;

    check.expect(!recs.is_empty(), "User1 should receive recommendations");
    check.expect(
        recommended.is_disjoint(&user1_items),
        "Should not recommend already rated items",
    );
    Ok(check)
}
