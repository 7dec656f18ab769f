use crate::environment::HostEnvironment;

pub(crate) fn probe(env: &dyn HostEnvironment) -> bool {
    env.max_touch_points().is_some_and(|points| points > 0)
}
