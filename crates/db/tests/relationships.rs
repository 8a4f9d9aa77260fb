//! The relationship core: project assignment reconciliation, the
//! proposal status machine and its client-book side effects, referential
//! deletes, and invoice listings.

use lancer_db::models::client::CreateClient;
use lancer_db::models::freelancer::{ClientSource, CreateFreelancer};
use lancer_db::models::invoice::CreateInvoice;
use lancer_db::models::project::{CreateProject, ProjectStatus, UpdateProject};
use lancer_db::models::proposal::{
    CreateProposal, ProposalClient, ProposalStatus, UpdateProposal,
};
use lancer_db::models::team_member::CreateTeamMember;
use lancer_db::repositories::{
    ClientRepo, FreelancerRepo, InvoiceRepo, ProjectRepo, ProposalRepo, TeamMemberRepo,
};
use lancer_core::invoice::InvoiceItem;
use lancer_core::types::DbId;
use sqlx::PgPool;

async fn seed_freelancer(pool: &PgPool, tag: &str) -> DbId {
    FreelancerRepo::create(
        pool,
        &CreateFreelancer {
            name: format!("Freelancer {tag}"),
            email: format!("{tag}@freelancer.test"),
            mobile: format!("+4477{tag}"),
            password_hash: "$argon2id$stub".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_client(pool: &PgPool, tag: &str) -> DbId {
    ClientRepo::create(
        pool,
        &CreateClient {
            name: format!("Client {tag}"),
            email: format!("{tag}@client.test"),
            mobile: format!("+1555{tag}"),
            password_hash: "$argon2id$stub".to_string(),
            company_name: Some(format!("{tag} Ltd")),
            profile_image: None,
            address: None,
            bio: None,
            website: None,
            terms_agreed: Some(true),
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_member(pool: &PgPool, tag: &str) -> DbId {
    TeamMemberRepo::create(
        pool,
        &CreateTeamMember {
            name: format!("Member {tag}"),
            email: format!("{tag}@team.test"),
            role: "Developer".to_string(),
            status: None,
            bio: None,
            profile_image: None,
            mobile: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn project_input(client_id: DbId, assigned_to: Vec<DbId>) -> CreateProject {
    CreateProject {
        client_id,
        title: "Marketplace revamp".to_string(),
        description: "Rebuild the storefront".to_string(),
        category: Some("Web".to_string()),
        budget: "5000".to_string(),
        deadline: None,
        attachments: None,
        status: None,
        assigned_to,
    }
}

fn proposal_input(client_id: DbId) -> CreateProposal {
    CreateProposal {
        client_id,
        title: Some("Storefront proposal".to_string()),
        client: Some(ProposalClient {
            name: Some("Client".to_string()),
            company: Some("Client Ltd".to_string()),
            email: Some("contact@client.test".to_string()),
            phone: Some("+1555".to_string()),
            date: None,
        }),
        overview: Some("Scope and terms".to_string()),
        scope_of_work: Some(vec!["Design".to_string(), "Build".to_string()]),
        timeline_start: None,
        timeline_end: None,
        total: Some(5000.0),
        terms: Some(vec!["50% upfront".to_string()]),
    }
}

async fn snapshot_client_ids(pool: &PgPool, freelancer_id: DbId) -> Vec<DbId> {
    FreelancerRepo::list_client_snapshots(pool, freelancer_id)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.client_id)
        .collect()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn project_create_writes_assignments_and_activity(pool: PgPool) {
    let freelancer = seed_freelancer(&pool, "10").await;
    let client = seed_client(&pool, "10").await;
    let m1 = seed_member(&pool, "10a").await;
    let m2 = seed_member(&pool, "10b").await;

    let (project, assigned) =
        ProjectRepo::create(&pool, freelancer, &project_input(client, vec![m1, m2]))
            .await
            .unwrap();

    assert_eq!(project.status, ProjectStatus::Pending);
    assert_eq!(project.progress, 0);
    assert_eq!(assigned, vec![m1, m2]);

    let activity = ProjectRepo::activity(&pool, project.id).await.unwrap();
    assert_eq!(activity.len(), 1);
    assert_eq!(activity[0].action, "Project created");

    // The inverse side sees the same relationship.
    assert_eq!(
        TeamMemberRepo::assigned_project_ids(&pool, m1).await.unwrap(),
        vec![project.id]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reconciliation_adds_and_removes(pool: PgPool) {
    let freelancer = seed_freelancer(&pool, "20").await;
    let client = seed_client(&pool, "20").await;
    let a = seed_member(&pool, "20a").await;
    let b = seed_member(&pool, "20b").await;
    let c = seed_member(&pool, "20c").await;

    let (project, _) = ProjectRepo::create(&pool, freelancer, &project_input(client, vec![a, b]))
        .await
        .unwrap();

    let (_, assigned) = ProjectRepo::update(
        &pool,
        freelancer,
        project.id,
        &UpdateProject {
            assigned_to: Some(vec![b, c]),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    let mut assigned = assigned;
    assigned.sort_unstable();
    let mut expected = vec![b, c];
    expected.sort_unstable();
    assert_eq!(assigned, expected);

    // a lost its row; b kept its original one; c gained one.
    assert!(TeamMemberRepo::assigned_project_ids(&pool, a).await.unwrap().is_empty());
    assert_eq!(
        TeamMemberRepo::assigned_project_ids(&pool, c).await.unwrap(),
        vec![project.id]
    );

    let activity = ProjectRepo::activity(&pool, project.id).await.unwrap();
    assert_eq!(activity.len(), 2);
    assert_eq!(activity[1].action, "Project updated");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_without_assigned_to_keeps_the_set(pool: PgPool) {
    let freelancer = seed_freelancer(&pool, "30").await;
    let client = seed_client(&pool, "30").await;
    let a = seed_member(&pool, "30a").await;

    let (project, _) = ProjectRepo::create(&pool, freelancer, &project_input(client, vec![a]))
        .await
        .unwrap();

    let (updated, assigned) = ProjectRepo::update(
        &pool,
        freelancer,
        project.id,
        &UpdateProject {
            status: Some(ProjectStatus::InProgress),
            progress: Some(40),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.status, ProjectStatus::InProgress);
    assert_eq!(updated.progress, 40);
    assert_eq!(assigned, vec![a]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_rejects_foreign_project(pool: PgPool) {
    let owner = seed_freelancer(&pool, "40").await;
    let other = seed_freelancer(&pool, "41").await;
    let client = seed_client(&pool, "40").await;

    let (project, _) = ProjectRepo::create(&pool, owner, &project_input(client, vec![]))
        .await
        .unwrap();

    let result = ProjectRepo::update(&pool, other, project.id, &UpdateProject::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn project_delete_cascades_children(pool: PgPool) {
    let freelancer = seed_freelancer(&pool, "50").await;
    let client = seed_client(&pool, "50").await;
    let a = seed_member(&pool, "50a").await;

    let (project, _) = ProjectRepo::create(&pool, freelancer, &project_input(client, vec![a]))
        .await
        .unwrap();

    assert!(ProjectRepo::delete(&pool, freelancer, project.id).await.unwrap());
    assert!(ProjectRepo::find_by_id_for_freelancer(&pool, freelancer, project.id)
        .await
        .unwrap()
        .is_none());
    assert!(TeamMemberRepo::assigned_project_ids(&pool, a).await.unwrap().is_empty());
    assert!(ProjectRepo::activity(&pool, project.id).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_by_non_owner_rolls_back(pool: PgPool) {
    let owner = seed_freelancer(&pool, "60").await;
    let other = seed_freelancer(&pool, "61").await;
    let client = seed_client(&pool, "60").await;
    let a = seed_member(&pool, "60a").await;

    let (project, _) = ProjectRepo::create(&pool, owner, &project_input(client, vec![a]))
        .await
        .unwrap();

    assert!(!ProjectRepo::delete(&pool, other, project.id).await.unwrap());
    // Children survived the rollback.
    assert_eq!(
        ProjectRepo::assigned_member_ids(&pool, project.id).await.unwrap(),
        vec![a]
    );
    assert_eq!(ProjectRepo::activity(&pool, project.id).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn accept_writes_snapshot_idempotently(pool: PgPool) {
    let freelancer = seed_freelancer(&pool, "70").await;
    let client = seed_client(&pool, "70").await;

    let proposal = ProposalRepo::create(&pool, freelancer, &proposal_input(client))
        .await
        .unwrap();
    assert_eq!(proposal.status, ProposalStatus::Pending);

    let accepted =
        ProposalRepo::set_status(&pool, client, proposal.id, ProposalStatus::Accepted)
            .await
            .unwrap()
            .unwrap();
    assert_eq!(accepted.status, ProposalStatus::Accepted);
    assert_eq!(snapshot_client_ids(&pool, freelancer).await, vec![client]);

    // Accepting again must not duplicate the snapshot.
    ProposalRepo::set_status(&pool, client, proposal.id, ProposalStatus::Accepted)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(snapshot_client_ids(&pool, freelancer).await, vec![client]);

    let snapshots = FreelancerRepo::list_client_snapshots(&pool, freelancer).await.unwrap();
    assert_eq!(snapshots[0].company.as_deref(), Some("Client Ltd"));
    assert_eq!(snapshots[0].source, ClientSource::Accepted);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reject_removes_only_the_matching_snapshot(pool: PgPool) {
    let freelancer = seed_freelancer(&pool, "80").await;
    let client_a = seed_client(&pool, "80").await;
    let client_b = seed_client(&pool, "81").await;

    let prop_a = ProposalRepo::create(&pool, freelancer, &proposal_input(client_a))
        .await
        .unwrap();
    let prop_b = ProposalRepo::create(&pool, freelancer, &proposal_input(client_b))
        .await
        .unwrap();

    ProposalRepo::set_status(&pool, client_a, prop_a.id, ProposalStatus::Accepted)
        .await
        .unwrap()
        .unwrap();
    ProposalRepo::set_status(&pool, client_b, prop_b.id, ProposalStatus::Accepted)
        .await
        .unwrap()
        .unwrap();

    let rejected =
        ProposalRepo::set_status(&pool, client_a, prop_a.id, ProposalStatus::Rejected)
            .await
            .unwrap()
            .unwrap();
    assert_eq!(rejected.status, ProposalStatus::Rejected);
    assert_eq!(snapshot_client_ids(&pool, freelancer).await, vec![client_b]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reject_without_prior_accept_is_a_noop(pool: PgPool) {
    let freelancer = seed_freelancer(&pool, "90").await;
    let client = seed_client(&pool, "90").await;

    let proposal = ProposalRepo::create(&pool, freelancer, &proposal_input(client))
        .await
        .unwrap();

    let rejected =
        ProposalRepo::set_status(&pool, client, proposal.id, ProposalStatus::Rejected)
            .await
            .unwrap()
            .unwrap();
    assert_eq!(rejected.status, ProposalStatus::Rejected);
    assert!(snapshot_client_ids(&pool, freelancer).await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn set_status_is_scoped_to_the_owning_client(pool: PgPool) {
    let freelancer = seed_freelancer(&pool, "100").await;
    let owner = seed_client(&pool, "100").await;
    let intruder = seed_client(&pool, "101").await;

    let proposal = ProposalRepo::create(&pool, freelancer, &proposal_input(owner))
        .await
        .unwrap();

    let result =
        ProposalRepo::set_status(&pool, intruder, proposal.id, ProposalStatus::Accepted)
            .await
            .unwrap();
    assert!(result.is_none());

    let unchanged = ProposalRepo::find_for_freelancer(&pool, freelancer, proposal.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.status, ProposalStatus::Pending);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn proposal_update_cannot_move_status_or_identity(pool: PgPool) {
    let freelancer = seed_freelancer(&pool, "110").await;
    let client = seed_client(&pool, "110").await;

    let proposal = ProposalRepo::create(&pool, freelancer, &proposal_input(client))
        .await
        .unwrap();
    ProposalRepo::set_status(&pool, client, proposal.id, ProposalStatus::Accepted)
        .await
        .unwrap()
        .unwrap();

    let updated = ProposalRepo::update(
        &pool,
        freelancer,
        proposal.id,
        &UpdateProposal {
            overview: Some("Revised scope".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.overview.as_deref(), Some("Revised scope"));
    assert_eq!(updated.status, ProposalStatus::Accepted);
    assert_eq!(updated.client_id, client);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn accepted_proposal_views_and_delete(pool: PgPool) {
    let freelancer = seed_freelancer(&pool, "120").await;
    let client = seed_client(&pool, "120").await;

    let pending = ProposalRepo::create(&pool, freelancer, &proposal_input(client))
        .await
        .unwrap();
    let accepted = ProposalRepo::create(&pool, freelancer, &proposal_input(client))
        .await
        .unwrap();
    ProposalRepo::set_status(&pool, client, accepted.id, ProposalStatus::Accepted)
        .await
        .unwrap()
        .unwrap();

    let engagements =
        ProposalRepo::list_by_client(&pool, client, Some(ProposalStatus::Accepted))
            .await
            .unwrap();
    assert_eq!(engagements.len(), 1);
    assert_eq!(engagements[0].id, accepted.id);

    // A pending proposal cannot be deleted through the engagement path.
    assert!(!ProposalRepo::delete_accepted_for_client(&pool, client, pending.id)
        .await
        .unwrap());
    assert!(ProposalRepo::delete_accepted_for_client(&pool, client, accepted.id)
        .await
        .unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn client_with_references_cannot_be_deleted(pool: PgPool) {
    let freelancer = seed_freelancer(&pool, "130").await;
    let client = seed_client(&pool, "130").await;
    ProjectRepo::create(&pool, freelancer, &project_input(client, vec![]))
        .await
        .unwrap();

    let err = ClientRepo::delete(&pool, client).await.unwrap_err();
    match err {
        sqlx::Error::Database(db) => assert_eq!(db.code().as_deref(), Some("23503")),
        other => panic!("expected foreign key violation, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn client_delete_prunes_book_snapshots(pool: PgPool) {
    let freelancer = seed_freelancer(&pool, "140").await;
    let client = seed_client(&pool, "140").await;

    let proposal = ProposalRepo::create(&pool, freelancer, &proposal_input(client))
        .await
        .unwrap();
    ProposalRepo::set_status(&pool, client, proposal.id, ProposalStatus::Accepted)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(snapshot_client_ids(&pool, freelancer).await, vec![client]);

    // The proposal blocks deletion; drop it first.
    assert!(ProposalRepo::delete_accepted_for_client(&pool, client, proposal.id)
        .await
        .unwrap());
    assert!(ClientRepo::delete(&pool, client).await.unwrap());
    assert!(snapshot_client_ids(&pool, freelancer).await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn book_created_clients_appear_in_the_live_list(pool: PgPool) {
    let freelancer = seed_freelancer(&pool, "150").await;

    let client = FreelancerRepo::add_client(
        &pool,
        freelancer,
        &CreateClient {
            name: "Book Client".to_string(),
            email: "book@client.test".to_string(),
            mobile: "+1555150".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            company_name: Some("Book Ltd".to_string()),
            profile_image: None,
            address: None,
            bio: None,
            website: None,
            terms_agreed: None,
        },
    )
    .await
    .unwrap();

    let live = FreelancerRepo::list_clients(&pool, freelancer).await.unwrap();
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].id, client.id);
    assert_eq!(snapshot_client_ids(&pool, freelancer).await, vec![client.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reject_leaves_book_created_clients_alone(pool: PgPool) {
    let freelancer = seed_freelancer(&pool, "155").await;

    let client = FreelancerRepo::add_client(
        &pool,
        freelancer,
        &CreateClient {
            name: "Standing Client".to_string(),
            email: "standing@client.test".to_string(),
            mobile: "+1555155".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            company_name: Some("Standing Ltd".to_string()),
            profile_image: None,
            address: None,
            bio: None,
            website: None,
            terms_agreed: None,
        },
    )
    .await
    .unwrap();

    let proposal = ProposalRepo::create(&pool, freelancer, &proposal_input(client.id))
        .await
        .unwrap();
    ProposalRepo::set_status(&pool, client.id, proposal.id, ProposalStatus::Rejected)
        .await
        .unwrap()
        .unwrap();

    // The book entry was created by hand, not by an acceptance; the
    // reject must not prune it.
    let live = FreelancerRepo::list_clients(&pool, freelancer).await.unwrap();
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].id, client.id);
    let snapshots = FreelancerRepo::list_client_snapshots(&pool, freelancer).await.unwrap();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].source, ClientSource::Book);

    // Even an accept/reject cycle leaves the book entry standing.
    ProposalRepo::set_status(&pool, client.id, proposal.id, ProposalStatus::Accepted)
        .await
        .unwrap()
        .unwrap();
    ProposalRepo::set_status(&pool, client.id, proposal.id, ProposalStatus::Rejected)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(snapshot_client_ids(&pool, freelancer).await, vec![client.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invoices_list_per_party(pool: PgPool) {
    let freelancer = seed_freelancer(&pool, "160").await;
    let client_a = seed_client(&pool, "160").await;
    let client_b = seed_client(&pool, "161").await;

    for client_id in [client_a, client_a, client_b] {
        InvoiceRepo::create(
            &pool,
            &CreateInvoice {
                freelancer_id: freelancer,
                client_id,
                invoice_number: None,
                invoice_date: None,
                items: vec![InvoiceItem {
                    description: "Work".to_string(),
                    quantity: 1.0,
                    price: 100.0,
                    total: 100.0,
                }],
                sub_total: 100.0,
                tax_rate: 0.0,
                tax_amount: 0.0,
                grand_total: 100.0,
                payment_method: None,
                terms: None,
            },
        )
        .await
        .unwrap();
    }

    assert_eq!(
        InvoiceRepo::list_by_freelancer(&pool, freelancer).await.unwrap().len(),
        3
    );
    assert_eq!(InvoiceRepo::list_by_client(&pool, client_a).await.unwrap().len(), 2);
    assert_eq!(InvoiceRepo::list_by_client(&pool, client_b).await.unwrap().len(), 1);
}
