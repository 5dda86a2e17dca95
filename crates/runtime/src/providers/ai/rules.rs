//! Ordered decision rules and the chain that evaluates them.

use game_core::{Direction, Position};

use super::AiContext;
use crate::api::Decision;

/// One step of the decision chain. Returns `None` when it does not apply.
pub trait AiRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn evaluate(&self, ctx: &AiContext<'_>) -> Option<Decision>;
}

/// Evaluates rules left to right until one succeeds.
pub struct RuleChain {
    rules: Vec<Box<dyn AiRule>>,
}

impl RuleChain {
    pub fn new(rules: Vec<Box<dyn AiRule>>) -> Self {
        Self { rules }
    }

    /// The winning rule's name and decision, if any rule applied.
    pub fn select(&self, ctx: &AiContext<'_>) -> Option<(&'static str, Decision)> {
        self.rules
            .iter()
            .find_map(|rule| rule.evaluate(ctx).map(|decision| (rule.name(), decision)))
    }
}

impl Default for RuleChain {
    fn default() -> Self {
        Self::new(vec![
            Box::new(ShieldRule),
            Box::new(OffensiveRule),
            Box::new(IceWallRule),
            Box::new(ApproachRule),
        ])
    }
}

/// Shield up when hurt, or when nothing can be cast from this far away.
pub struct ShieldRule;

impl AiRule for ShieldRule {
    fn name(&self) -> &'static str {
        "shield"
    }

    fn evaluate(&self, ctx: &AiContext<'_>) -> Option<Decision> {
        let spell = ctx.usable_spell(&ctx.config.shield_spell)?;
        if ctx.wizard.shield() > 0 {
            return None;
        }

        let out_of_reach = ctx.best_offensive().is_none()
            && ctx
                .shortest_offensive_range()
                .is_none_or(|range| ctx.distance > range);
        let low_hp = ctx.hp() <= ctx.config.low_hp_threshold;

        (out_of_reach || low_hp).then(|| Decision::CastSelf {
            spell: spell.name.clone(),
        })
    }
}

/// Cast the most preferred offensive spell that reaches the opponent.
pub struct OffensiveRule;

impl AiRule for OffensiveRule {
    fn name(&self) -> &'static str {
        "offensive"
    }

    fn evaluate(&self, ctx: &AiContext<'_>) -> Option<Decision> {
        ctx.best_offensive().map(|spell| Decision::CastAt {
            spell: spell.name.clone(),
            target: ctx.opponent,
        })
    }
}

/// Drop an Ice Wall in the opponent's path at medium distance.
pub struct IceWallRule;

impl IceWallRule {
    /// Cells in front of the opponent (towards us) first, then the four
    /// orthogonal neighbours of the opponent.
    fn candidates(ctx: &AiContext<'_>) -> Vec<Position> {
        let dx = (ctx.position.x - ctx.opponent.x).signum();
        let dy = (ctx.position.y - ctx.opponent.y).signum();

        let mut cells = Vec::with_capacity(6);
        if (dx, dy) != (0, 0) {
            cells.push(ctx.opponent.offset(dx, dy));
            cells.push(ctx.opponent.offset(dx * 2, dy * 2));
        }
        cells.extend([
            ctx.opponent.offset(1, 0),
            ctx.opponent.offset(-1, 0),
            ctx.opponent.offset(0, 1),
            ctx.opponent.offset(0, -1),
        ]);
        cells
    }
}

impl AiRule for IceWallRule {
    fn name(&self) -> &'static str {
        "ice_wall"
    }

    fn evaluate(&self, ctx: &AiContext<'_>) -> Option<Decision> {
        if ctx.best_offensive().is_some() {
            return None;
        }
        let band = ctx.config.ice_wall_min_distance..=ctx.config.ice_wall_max_distance;
        if !band.contains(&ctx.distance) {
            return None;
        }
        let spell = ctx.usable_spell(&ctx.config.ice_wall_spell)?;

        Self::candidates(ctx)
            .into_iter()
            .find(|cell| {
                let distance = ctx.position.chebyshev(*cell);
                distance > 0 && distance <= spell.range && ctx.is_free(*cell)
            })
            .map(|target| Decision::CastAt {
                spell: spell.name.clone(),
                target,
            })
    }
}

/// Step to the free neighbour that strictly reduces the distance to the
/// opponent the most. Ties keep the earlier direction.
pub struct ApproachRule;

impl AiRule for ApproachRule {
    fn name(&self) -> &'static str {
        "approach"
    }

    fn evaluate(&self, ctx: &AiContext<'_>) -> Option<Decision> {
        let mut best: Option<(Direction, u32)> = None;
        let mut best_distance = ctx.distance;

        for direction in Direction::ALL {
            let (dx, dy) = direction.delta();
            let cell = ctx.position.offset(dx, dy);
            if !ctx.is_free(cell) {
                continue;
            }
            let distance = cell.chebyshev(ctx.opponent);
            if distance < best_distance {
                best_distance = distance;
                best = Some((direction, distance));
            }
        }

        best.map(|(direction, _)| Decision::Move(direction))
    }
}
