//! Largest strongly-connected-component extraction.
//!
//! Kosaraju's algorithm, implemented with explicit stacks: road networks can
//! contain DFS paths millions of vertices deep, far beyond the call stack.
//!
//! Retaining only the largest SCC guarantees the hard builder invariant that
//! every surviving vertex reaches, and is reached by, every other surviving
//! vertex — a search between any two retained vertices can never dead-end.

use crate::Link;

/// Membership mask for the largest SCC: `mask[v] == true` iff vertex `v`
/// survives compaction.  An input with no vertices yields an empty mask.
pub fn largest_scc_mask(vertex_count: usize, links: &[Link]) -> Vec<bool> {
    if vertex_count == 0 {
        return Vec::new();
    }

    let mut forward: Vec<Vec<u32>> = vec![Vec::new(); vertex_count];
    let mut reverse: Vec<Vec<u32>> = vec![Vec::new(); vertex_count];
    for link in links {
        forward[link.src.index()].push(link.dst.0);
        reverse[link.dst.index()].push(link.src.0);
    }

    // Pass 1: DFS finish order over the forward graph.
    let mut finish_order: Vec<u32> = Vec::with_capacity(vertex_count);
    let mut visited = vec![false; vertex_count];
    // (vertex, index of the next child to descend into)
    let mut stack: Vec<(u32, usize)> = Vec::new();

    for root in 0..vertex_count as u32 {
        if visited[root as usize] {
            continue;
        }
        visited[root as usize] = true;
        stack.push((root, 0));
        while let Some((v, child)) = stack.pop() {
            match forward[v as usize].get(child) {
                Some(&next) => {
                    stack.push((v, child + 1));
                    if !visited[next as usize] {
                        visited[next as usize] = true;
                        stack.push((next, 0));
                    }
                }
                None => finish_order.push(v),
            }
        }
    }

    // Pass 2: peel components off the reverse graph in reverse finish order;
    // keep only the largest.
    let mut component = vec![u32::MAX; vertex_count];
    let mut largest_id = u32::MAX;
    let mut largest_size = 0usize;
    let mut next_component = 0u32;
    let mut dfs: Vec<u32> = Vec::new();

    for &root in finish_order.iter().rev() {
        if component[root as usize] != u32::MAX {
            continue;
        }
        let id = next_component;
        next_component += 1;

        let mut size = 0usize;
        component[root as usize] = id;
        dfs.push(root);
        while let Some(v) = dfs.pop() {
            size += 1;
            for &next in &reverse[v as usize] {
                if component[next as usize] == u32::MAX {
                    component[next as usize] = id;
                    dfs.push(next);
                }
            }
        }

        if size > largest_size {
            largest_size = size;
            largest_id = id;
        }
    }

    component.into_iter().map(|c| c == largest_id).collect()
}
