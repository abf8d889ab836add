use enumset::EnumSet;

use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
use crate::basic_types::PropagatorStatus;
use crate::engine::cp::domain_events::Delta;
use crate::engine::cp::domain_events::DomainEvents;
use crate::engine::cp::domain_events::IntDomainEvent;
use crate::engine::cp::propagation::EnqueueDecision;
use crate::engine::cp::propagation::LocalId;
use crate::engine::cp::propagation::PropagationContext;
use crate::engine::cp::propagation::PropagationContextMut;
use crate::engine::cp::propagation::Propagator;
use crate::engine::cp::propagation::PropagatorCost;
use crate::engine::cp::propagation::PropagatorInitialisationContext;
use crate::engine::cp::propagation::ReadDomains;
use crate::variables::Literal;

fn is_true<Context: ReadDomains>(context: &Context, literal: &Literal) -> bool {
    context.lower_bound(literal) == 1
}

fn is_false<Context: ReadDomains>(context: &Context, literal: &Literal) -> bool {
    context.upper_bound(literal) == 0
}

/// Propagator for the binary clause `x0 \/ x1`.
#[derive(Clone, Debug)]
pub(crate) struct BinaryOrTrue {
    x0: Literal,
    x1: Literal,
}

impl BinaryOrTrue {
    pub(crate) fn new(x0: Literal, x1: Literal) -> Self {
        BinaryOrTrue { x0, x1 }
    }
}

impl Propagator for BinaryOrTrue {
    fn name(&self) -> &str {
        "BinaryOrTrue"
    }

    fn cost(&self) -> PropagatorCost {
        PropagatorCost::Binary
    }

    fn initialise(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> Result<(), Inconsistency> {
        let _ = context.register(self.x0, DomainEvents::ASSIGN, LocalId::from(0));
        let _ = context.register(self.x1, DomainEvents::ASSIGN, LocalId::from(1));

        Ok(())
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        if is_true(&context, &self.x0) || is_true(&context, &self.x1) {
            return Ok(PropagatorStatus::Subsumed);
        }

        if is_false(&context, &self.x0) {
            let _ = context.assign(&self.x1, 1)?;
            return Ok(PropagatorStatus::Subsumed);
        }

        if is_false(&context, &self.x1) {
            let _ = context.assign(&self.x0, 1)?;
            return Ok(PropagatorStatus::Subsumed);
        }

        Ok(PropagatorStatus::Fix)
    }
}

/// Propagator for `(x0 \/ x1) = y`. Conjunctions and implications are obtained through negated
/// literals: `x0 /\ x1 = y` is `(!x0 \/ !x1) = !y`.
#[derive(Clone, Debug)]
pub(crate) struct TernaryOr {
    x0: Literal,
    x1: Literal,
    y: Literal,
}

impl TernaryOr {
    pub(crate) fn new(x0: Literal, x1: Literal, y: Literal) -> Self {
        TernaryOr { x0, x1, y }
    }
}

impl Propagator for TernaryOr {
    fn name(&self) -> &str {
        "TernaryOr"
    }

    fn cost(&self) -> PropagatorCost {
        PropagatorCost::Ternary
    }

    fn initialise(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> Result<(), Inconsistency> {
        let _ = context.register(self.x0, DomainEvents::ASSIGN, LocalId::from(0));
        let _ = context.register(self.x1, DomainEvents::ASSIGN, LocalId::from(1));
        let _ = context.register(self.y, DomainEvents::ASSIGN, LocalId::from(2));

        Ok(())
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        if is_true(&context, &self.x0) || is_true(&context, &self.x1) {
            let _ = context.assign(&self.y, 1)?;
            return Ok(PropagatorStatus::Subsumed);
        }

        if is_false(&context, &self.y) {
            let _ = context.assign(&self.x0, 0)?;
            let _ = context.assign(&self.x1, 0)?;
            return Ok(PropagatorStatus::Subsumed);
        }

        match (
            is_false(&context, &self.x0),
            is_false(&context, &self.x1),
            is_true(&context, &self.y),
        ) {
            (true, true, _) => {
                let _ = context.assign(&self.y, 0)?;
                Ok(PropagatorStatus::Subsumed)
            }
            (true, false, true) => {
                let _ = context.assign(&self.x1, 1)?;
                Ok(PropagatorStatus::Subsumed)
            }
            (false, true, true) => {
                let _ = context.assign(&self.x0, 1)?;
                Ok(PropagatorStatus::Subsumed)
            }
            _ => Ok(PropagatorStatus::Fix),
        }
    }
}

/// Propagator for the clause `\/ x_i`.
///
/// Only two literals which are not false are watched at any time. The advisor ignores changes of
/// the other literals unless they become true, in which case the clause is subsumed.
#[derive(Clone, Debug)]
pub(crate) struct NaryOrTrue {
    literals: Box<[Literal]>,
    watched: [usize; 2],
}

impl NaryOrTrue {
    pub(crate) fn new(literals: Box<[Literal]>) -> Self {
        NaryOrTrue {
            literals,
            watched: [0, 1],
        }
    }

    /// Find a literal which is not false and not watched by the other watch.
    fn find_watch(&self, context: &PropagationContextMut, other: usize) -> Option<usize> {
        (0..self.literals.len())
            .find(|&index| index != other && !is_false(context, &self.literals[index]))
    }
}

impl Propagator for NaryOrTrue {
    fn name(&self) -> &str {
        "NaryOrTrue"
    }

    fn cost(&self) -> PropagatorCost {
        PropagatorCost::Binary
    }

    fn initialise(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> Result<(), Inconsistency> {
        if self.literals.len() < 2 {
            return Err(Inconsistency::Conflict);
        }

        for (index, literal) in self.literals.iter().enumerate() {
            let _ = context.register_advisor(
                *literal,
                DomainEvents::ASSIGN,
                LocalId::from(index as u32),
            );
        }

        Ok(())
    }

    fn advise(
        &mut self,
        context: PropagationContext,
        local_id: LocalId,
        _events: EnumSet<IntDomainEvent>,
        _delta: Delta,
    ) -> EnqueueDecision {
        let index = local_id.unpack() as usize;

        if is_true(&context, &self.literals[index]) || self.watched.contains(&index) {
            EnqueueDecision::Enqueue
        } else {
            EnqueueDecision::Skip
        }
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        if self
            .literals
            .iter()
            .any(|literal| is_true(&context, literal))
        {
            return Ok(PropagatorStatus::Subsumed);
        }

        for watch in 0..2 {
            let other = self.watched[1 - watch];
            if is_false(&context, &self.literals[self.watched[watch]]) {
                match self.find_watch(&context, other) {
                    Some(replacement) => self.watched[watch] = replacement,
                    None => {
                        let _ = context.assign(&self.literals[other], 1)?;
                        return Ok(PropagatorStatus::Subsumed);
                    }
                }
            }
        }

        Ok(PropagatorStatus::Fix)
    }

    fn dispose(&mut self) -> usize {
        std::mem::size_of_val(self) + std::mem::size_of_val(&*self.literals)
    }
}

/// Propagator for `(\/ x_i) = y`.
///
/// The advisor counts the literals which became false, so the propagator only runs when a
/// literal became true, when all literals are false, or when a single candidate is left.
#[derive(Clone, Debug)]
pub(crate) struct NaryOr {
    literals: Box<[Literal]>,
    y: Literal,
    num_false: usize,
}

impl NaryOr {
    pub(crate) fn new(literals: Box<[Literal]>, y: Literal) -> Self {
        NaryOr {
            literals,
            y,
            num_false: 0,
        }
    }

    fn y_local_id(&self) -> LocalId {
        LocalId::from(self.literals.len() as u32)
    }
}

impl Propagator for NaryOr {
    fn name(&self) -> &str {
        "NaryOr"
    }

    fn cost(&self) -> PropagatorCost {
        PropagatorCost::Linear
    }

    fn initialise(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> Result<(), Inconsistency> {
        for (index, literal) in self.literals.iter().enumerate() {
            let _ = context.register_advisor(
                *literal,
                DomainEvents::ASSIGN,
                LocalId::from(index as u32),
            );
        }
        let _ = context.register(self.y, DomainEvents::ASSIGN, self.y_local_id());

        self.num_false = self
            .literals
            .iter()
            .filter(|literal| is_false(&*context, literal))
            .count();

        Ok(())
    }

    fn advise(
        &mut self,
        context: PropagationContext,
        local_id: LocalId,
        _events: EnumSet<IntDomainEvent>,
        _delta: Delta,
    ) -> EnqueueDecision {
        let literal = &self.literals[local_id.unpack() as usize];

        if is_true(&context, literal) {
            return EnqueueDecision::Enqueue;
        }

        self.num_false += 1;
        if self.num_false + 1 >= self.literals.len() {
            EnqueueDecision::Enqueue
        } else {
            EnqueueDecision::Skip
        }
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        if is_false(&context, &self.y) {
            for literal in self.literals.iter() {
                let _ = context.assign(literal, 0)?;
            }
            return Ok(PropagatorStatus::Subsumed);
        }

        if self
            .literals
            .iter()
            .any(|literal| is_true(&context, literal))
        {
            let _ = context.assign(&self.y, 1)?;
            return Ok(PropagatorStatus::Subsumed);
        }

        if self.num_false == self.literals.len() {
            let _ = context.assign(&self.y, 0)?;
            return Ok(PropagatorStatus::Subsumed);
        }

        if is_true(&context, &self.y) && self.num_false + 1 == self.literals.len() {
            let last = self
                .literals
                .iter()
                .find(|literal| !is_false(&context, literal))
                .expect("exactly one literal is not false");
            let _ = context.assign(last, 1)?;
            return Ok(PropagatorStatus::Subsumed);
        }

        Ok(PropagatorStatus::Fix)
    }

    fn dispose(&mut self) -> usize {
        std::mem::size_of_val(self) + std::mem::size_of_val(&*self.literals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_helper::TestSpace;

    #[test]
    fn binary_clause_with_both_literals_false_fails() {
        let mut space = TestSpace::default();
        let x0 = space.new_literal();
        let x1 = space.new_literal();
        space.set_literal(x0, false);
        space.set_literal(x1, false);

        assert!(space.new_propagator(BinaryOrTrue::new(x0, x1)).is_err());
    }

    #[test]
    fn ternary_or_as_conjunction() {
        let mut space = TestSpace::default();
        let x0 = space.new_literal();
        let x1 = space.new_literal();
        let y = space.new_literal();
        space.set_literal(y, true);

        // x0 /\ x1 = y
        let _ = space
            .new_propagator(TernaryOr::new(!x0, !x1, !y))
            .expect("no empty domains");

        assert!(space.is_literal_true(x0));
        assert!(space.is_literal_true(x1));
    }

    #[test]
    fn clause_moves_its_watches() {
        let mut space = TestSpace::default();
        let literals = (0..4).map(|_| space.new_literal()).collect::<Vec<_>>();

        let propagator = space
            .new_propagator(NaryOrTrue::new(literals.clone().into()))
            .expect("no empty domains");

        space.set_literal(literals[0], false);
        space.set_literal(literals[1], false);
        let status = space.propagate(propagator).expect("no empty domains");
        assert_eq!(status, PropagatorStatus::Fix);

        space.set_literal(literals[3], false);
        let status = space.propagate(propagator).expect("no empty domains");
        assert_eq!(status, PropagatorStatus::Subsumed);
        assert!(space.is_literal_true(literals[2]));
    }

    #[test]
    fn disjunction_is_false_when_every_literal_is() {
        let mut space = TestSpace::default();
        let literals = (0..3).map(|_| space.new_literal()).collect::<Vec<_>>();
        let y = space.new_literal();
        for literal in &literals {
            space.set_literal(*literal, false);
        }

        let _ = space
            .new_propagator(NaryOr::new(literals.into(), y))
            .expect("no empty domains");

        assert!(space.is_literal_false(y));
    }

    #[test]
    fn disjunction_forces_the_last_candidate() {
        let mut space = TestSpace::default();
        let literals = (0..3).map(|_| space.new_literal()).collect::<Vec<_>>();
        let y = space.new_literal();
        space.set_literal(y, true);
        space.set_literal(literals[0], false);
        space.set_literal(literals[2], false);

        let _ = space
            .new_propagator(NaryOr::new(literals.clone().into(), y))
            .expect("no empty domains");

        assert!(space.is_literal_true(literals[1]));
    }
}
