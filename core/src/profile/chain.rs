//! Greedy tolerance-based chaining of curve entities into profiles.
//!
//! Edges are held in an index-addressed arena with a consumed flag per
//! slot; chains grow by scanning the remaining edges in original document
//! order and appending the first one whose endpoint lands within the
//! connection tolerance of the chain tail. First match wins, not nearest
//! match, so chaining quality is order-dependent. That is carried source
//! behavior, kept deliberately rather than silently improved.

use crate::config::{ChainAcceptance, Config};
use crate::drawing::CurveEntity;
use crate::geometry::Point2D;
use crate::profile::Profile;
use tracing::debug;

/// Chain a flat edge list into profiles.
///
/// Never fails: edges that cannot be closed still come back as
/// best-effort profiles when they reach the minimum edge count (under the
/// default [`ChainAcceptance::AcceptOpen`] policy). The result is sorted
/// by area descending and the largest profile is marked outer.
pub fn chain_profiles(edges: &[CurveEntity], config: &Config) -> Vec<Profile> {
    let mut profiles = Vec::new();
    let mut used = vec![false; edges.len()];

    // Circles and closed polylines are loops on their own.
    for (i, edge) in edges.iter().enumerate() {
        if edge.is_intrinsically_closed() {
            used[i] = true;
            let mut profile = Profile::new(vec![edge.clone()]);
            profile.compute_metrics(config);
            debug!(
                kind = edge.kind_name(),
                area = profile.area,
                "found intrinsically closed profile"
            );
            profiles.push(profile);
        }
    }

    // Chain the open edges.
    while let Some(seed) = next_unused(&used) {
        used[seed] = true;
        let mut chain = vec![seed];
        let mut tail: Option<Point2D> = edges[seed].end_point();

        // Scan cap guarantees termination on degenerate inputs; it is not
        // a user-facing limit.
        let remaining = used.iter().filter(|u| !**u).count();
        let max_scans = remaining + 10;

        for _ in 0..max_scans {
            let Some(tail_point) = tail else { break };
            let Some((next, next_tail)) =
                find_connection(edges, &used, tail_point, config.edge_connection_tolerance)
            else {
                break;
            };
            used[next] = true;
            chain.push(next);
            tail = Some(next_tail);
        }

        if chain.len() >= config.min_profile_edges {
            let mut profile = Profile::new(chain.iter().map(|&i| edges[i].clone()).collect());
            profile.compute_metrics(config);
            debug!(
                edges = profile.edge_count(),
                area = profile.area,
                closed = profile.is_closed,
                gap = profile.closure_gap,
                "chained profile"
            );
            if profile.is_closed || config.chain_acceptance == ChainAcceptance::AcceptOpen {
                profiles.push(profile);
            } else {
                debug!(gap = profile.closure_gap, "dropping unclosed chain");
            }
        }
    }

    // Largest area first; stable sort keeps creation order on ties.
    profiles.sort_by(|a, b| b.area.partial_cmp(&a.area).unwrap_or(std::cmp::Ordering::Equal));
    for (i, profile) in profiles.iter_mut().enumerate() {
        profile.is_outer = i == 0;
    }

    debug!(count = profiles.len(), "profile chaining complete");
    profiles
}

fn next_unused(used: &[bool]) -> Option<usize> {
    used.iter().position(|u| !u)
}

/// First unused edge (document order) with an endpoint within `tolerance`
/// of `tail`. Returns the edge index and the new tail point: the edge's
/// end when connected forward, its start when connected reversed.
fn find_connection(
    edges: &[CurveEntity],
    used: &[bool],
    tail: Point2D,
    tolerance: f64,
) -> Option<(usize, Point2D)> {
    for (i, edge) in edges.iter().enumerate() {
        if used[i] {
            continue;
        }
        let (Some(start), Some(end)) = (edge.start_point(), edge.end_point()) else {
            continue;
        };
        if tail.distance_to(start) < tolerance {
            return Some((i, end));
        }
        if tail.distance_to(end) < tolerance {
            // Conceptual start/end swap: the chain continues from the
            // edge's stored start point.
            return Some((i, start));
        }
    }
    None
}
