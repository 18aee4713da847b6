use super::*;

#[test]
fn route_kind_follows_navigation() {
	let slug = RwSignal::new(Some("complete".to_owned()));
	let kind = preselected(slug.into());
	assert_eq!(kind.get_untracked(), Some(GraphKind::Complete));

	slug.set(Some("circulant".to_owned()));
	assert_eq!(kind.get_untracked(), Some(GraphKind::Circulant));

	slug.set(None);
	assert_eq!(kind.get_untracked(), None);
}

#[test]
fn unknown_route_kind_selects_nothing() {
	let slug = RwSignal::new(Some("petersen".to_owned()));
	assert_eq!(preselected(slug.into()).get_untracked(), None);
}
