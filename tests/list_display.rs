use std::sync::Arc;

use vitrine::{AdminUrl, Column, ColumnSpec, LinkParams, ListDisplay, RouteTable, VitrineError};

struct Repo {
    name: String,
    description: String,
    homepage: String,
    owner_id: u32,
    archived: bool,
}

fn repo() -> Repo {
    Repo {
        name: "flux".to_string(),
        description: "a capacitor for everything and then some".to_string(),
        homepage: "example.com".to_string(),
        owner_id: 42,
        archived: false,
    }
}

fn routes() -> Arc<RouteTable> {
    Arc::new(
        RouteTable::new()
            .route("repo-changelist", "/admin/repos/")
            .route("owner-detail", "/admin/owners/{id}/"),
    )
}

fn display() -> ListDisplay<Repo> {
    ListDisplay::new()
        .add(
            Column::new("name", |repo: &Repo| repo.name.clone())
                .short_description("Repository")
                .order_field("name"),
        )
        .add(
            Column::new("description", |repo: &Repo| repo.description.clone())
                .limit_width(16)
                .apply_filter("upper")
                .unwrap(),
        )
        .add(
            Column::new("homepage", |repo: &Repo| repo.homepage.clone())
                .external_url()
                .unwrap(),
        )
        .add(Column::new("archived", |repo: &Repo| repo.archived.to_string()).boolean())
        .add(
            AdminUrl::new(routes(), "repo-changelist")
                .display_text("by owner")
                .column("by_owner", |repo: &Repo| {
                    LinkParams::new().param("owner__id__exact", repo.owner_id.to_string())
                }),
        )
}

#[test]
fn headers_come_from_specs_with_humanized_fallback() {
    assert_eq!(
        display().headers(),
        vec!["Repository", "Description", "Homepage", "Archived", "By owner"]
    );
}

#[test]
fn specs_expose_what_the_host_needs() {
    let display = display();
    let name = display.get("name").unwrap().spec();
    assert_eq!(name.order_field.as_deref(), Some("name"));
    assert!(!name.allows_markup());

    assert!(display.get("archived").unwrap().spec().is_boolean());
    assert!(display.get("homepage").unwrap().spec().allows_markup());
    assert!(display.get("by_owner").unwrap().spec().allows_markup());
}

#[test]
fn renders_a_full_row() {
    let cells = display().render_row(&repo()).unwrap();

    assert_eq!(cells[0].as_str(), "flux");
    // truncated to 16 chars first, uppercased second
    assert_eq!(cells[1].as_str(), "A CAPACITOR F...");
    assert_eq!(
        cells[2].as_str(),
        r#"<a href="example.com" target="_blank">example.com</a>"#
    );
    assert_eq!(cells[3].as_str(), "false");
    assert_eq!(
        cells[4].as_str(),
        r#"<a href="/admin/repos/?owner__id__exact=42">by owner</a>"#
    );

    assert!(!cells[0].is_markup());
    assert!(cells[2].is_markup());
    assert!(cells[4].is_markup());
}

#[test]
fn stacking_order_is_the_callers_choice() {
    // Uppercase first, truncate second: the ellipsis survives.
    let column = Column::new("description", |repo: &Repo| repo.description.clone())
        .apply_filter("upper")
        .unwrap()
        .limit_width(16);
    assert_eq!(column.render(&repo()).unwrap().as_str(), "A CAPACITOR F...");

    // Truncate to 20, then uppercase: same pipeline, different limit.
    let column = Column::new("description", |repo: &Repo| repo.description.clone())
        .limit_width(20)
        .apply_filter("upper")
        .unwrap();
    assert_eq!(column.render(&repo()).unwrap().as_str(), "A CAPACITOR FOR E...");
}

#[test]
fn combined_spec_overlay_mirrors_individual_setters() {
    let column = Column::new("name", |repo: &Repo| repo.name.clone()).with_spec(
        ColumnSpec::new()
            .short_description("Repository")
            .order_field("name"),
    );
    assert_eq!(column.header(), "Repository");
    assert_eq!(column.spec().order_field.as_deref(), Some("name"));
    assert_eq!(column.spec().boolean, None);
}

#[test]
fn link_reversal_with_kwargs_and_query() {
    let column = AdminUrl::new(routes(), "owner-detail").column("owner", |repo: &Repo| {
        LinkParams::new()
            .kwarg("id", repo.owner_id.to_string())
            .param("tab", "repos")
    });
    assert_eq!(
        column.render(&repo()).unwrap().as_str(),
        r#"<a href="/admin/owners/42/?tab=repos">/admin/owners/42/?tab=repos</a>"#
    );
}

#[test]
fn unknown_route_surfaces_from_render_row() {
    let display = ListDisplay::new().add(
        AdminUrl::new(routes(), "does-not-exist")
            .column("broken", |_: &Repo| LinkParams::new()),
    );
    let err = display.render_row(&repo()).unwrap_err();
    assert!(matches!(err, VitrineError::UnknownRoute(name) if name == "does-not-exist"));
}
