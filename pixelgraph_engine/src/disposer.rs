//! LIFO teardown of initialized node contexts.

use crate::context::GraphContext;

/// Pops `init_order_stack` front-to-back, disposing each context's operator
/// and then releasing its target product.
///
/// Disposal is best-effort: disposal errors are logged at warning level
/// and swallowed, so one operator's failure to dispose cleanly never stops
/// the rest of the stack from being torn down.
pub fn dispose_all(context: &mut GraphContext<'_>) {
	let stack = std::mem::take(&mut context.init_order_stack);
	for node_id in stack {
		let Some(ctx) = context.node_contexts.get_mut(&node_id) else { continue };

		if let Some(mut operator) = ctx.operator.take() {
			if let Err(err) = operator.dispose() {
				log::warn!("disposing operator for node '{node_id}' failed: {err:#}");
			}
		}
		ctx.target_product = None;
	}
}
