//! Transitive Dependency Closure (§4.5).
//!
//! `depends_on[R]` holds the variables whose initializers read `R`
//! (§4.4's direct relation). This pass closes that relation: if `V`
//! depends on `R` and `R` depends on `S`, `V` is made to depend on `S`
//! too, propagating `depends_on_a_global` along the same edge. The
//! relation is monotonic over a finite name set, so naive iteration to a
//! fixpoint terminates.

use crate::tables::Tables;

pub fn run(tables: &mut Tables) {
    let keys: Vec<String> = tables.depends_on.keys().cloned().collect();

    loop {
        let mut changed = false;

        for s in &keys {
            let rs: Vec<String> = tables
                .depends_on
                .get(s)
                .cloned()
                .unwrap_or_default()
                .into_iter()
                .collect();

            for r in rs {
                let vs: Vec<String> = tables
                    .depends_on
                    .get(&r)
                    .cloned()
                    .unwrap_or_default()
                    .into_iter()
                    .collect();

                for v in vs {
                    if tables.depends_on.entry(s.clone()).or_default().insert(v.clone()) {
                        changed = true;
                    }
                    if !tables.is_local.contains(s)
                        && tables.depends_on_a_global.insert(v.clone(), true) != Some(true)
                    {
                        changed = true;
                    }
                }
            }
        }

        if !changed {
            break;
        }
    }
}
