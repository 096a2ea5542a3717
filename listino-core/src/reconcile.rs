use std::borrow::Borrow;
use std::collections::BTreeMap;

use crate::mapper::CrossReference;
use crate::normalize::normalize_row;
use crate::row::RawPriceRow;
use crate::{FeedFields, PriceMap, PriceTemplate, ReconcileSummary};

/// Merges a vendor feed into per-card, per-finish price objects.
///
/// - Rows without a readable identifier, or whose identifier is not in the
///   cross-reference, are dropped and counted.
/// - A matched row fetches-or-creates the object for every canonical id it
///   resolves to, then sets whichever prices it carries. Earlier values are
///   kept when a later row omits a price and replaced when it supplies one
///   (last write wins, by row order).
/// - A matched row with no usable price still yields an object with both
///   prices unset.
#[derive(Debug, Clone)]
pub struct PriceReconciler {
    fields: FeedFields,
    template: PriceTemplate,
}

impl PriceReconciler {
    /// Create a reconciler for one provider's row shape and price template.
    #[must_use]
    pub const fn new(fields: FeedFields, template: PriceTemplate) -> Self {
        Self { fields, template }
    }

    /// Field names this reconciler reads.
    #[must_use]
    pub const fn fields(&self) -> &FeedFields {
        &self.fields
    }

    /// Template every new price object is cloned from.
    #[must_use]
    pub const fn template(&self) -> &PriceTemplate {
        &self.template
    }

    /// Reconcile `rows` against `xref`.
    pub fn reconcile<I, R>(&self, rows: I, xref: &CrossReference) -> PriceMap
    where
        I: IntoIterator<Item = R>,
        R: Borrow<RawPriceRow>,
    {
        self.reconcile_with_summary(rows, xref).0
    }

    /// Reconcile `rows` against `xref` and report what happened to them.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "listino_core::reconcile",
            skip(self, rows, xref),
            fields(provider = %self.template.provider, xref_keys = xref.len()),
        )
    )]
    pub fn reconcile_with_summary<I, R>(
        &self,
        rows: I,
        xref: &CrossReference,
    ) -> (PriceMap, ReconcileSummary)
    where
        I: IntoIterator<Item = R>,
        R: Borrow<RawPriceRow>,
    {
        let mut out = PriceMap::new();
        let mut summary = ReconcileSummary::default();

        for row in rows {
            let row = row.borrow();
            summary.rows += 1;

            let Some(third_party_id) = row.id(&self.fields.id) else {
                summary.missing_id += 1;
                continue;
            };
            let Some(canonical_ids) = xref.get(&third_party_id) else {
                summary.unmapped += 1;
                continue;
            };
            summary.matched += 1;

            let normalized = normalize_row(row, &self.fields);
            for canonical_id in canonical_ids {
                let price = out
                    .entry(canonical_id.clone())
                    .or_insert_with(BTreeMap::new)
                    .entry(normalized.finish)
                    .or_insert_with(|| self.template.instantiate(canonical_id, normalized.finish));
                if let Some(retail) = normalized.retail {
                    price.set_retail(retail);
                }
                if let Some(buy) = normalized.buy {
                    price.set_buy(buy);
                }
            }
        }

        summary.objects = out.values().map(BTreeMap::len).sum();
        #[cfg(feature = "tracing")]
        tracing::info!(
            rows = summary.rows,
            matched = summary.matched,
            unmapped = summary.unmapped,
            missing_id = summary.missing_id,
            objects = summary.objects,
            "reconciled price feed"
        );
        (out, summary)
    }
}
