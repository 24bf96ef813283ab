//! Example support tickets served by `GET /examples`, handy for demoing the
//! classifier without inventing inputs.

use model::Ticket;

pub fn example_tickets() -> Vec<Ticket> {
    vec![
        Ticket {
            id: "TICKET-001".into(),
            subject: "API returning 500 errors - Production down!".into(),
            description: "Our production system is completely down. We're getting 500 \
                Internal Server Errors on all API endpoints since 2 hours ago. This is \
                affecting all our customers and we're losing revenue. Endpoint: \
                /api/v2/users. This is URGENT - our SLA requires 99.9% uptime."
                .into(),
            customer_email: Some("cto@acmecorp.com".into()),
        },
        Ticket {
            id: "TICKET-002".into(),
            subject: "How to export data to CSV?".into(),
            description: "I'm trying to export our analytics data to CSV format but can't \
                find the option in the dashboard. I've checked the documentation but it's \
                not clear where this feature is located. Could you guide me through the \
                steps? Our team needs this for monthly reporting."
                .into(),
            customer_email: Some("analyst@smallbiz.com".into()),
        },
        Ticket {
            id: "TICKET-003".into(),
            subject: "Request: Dark mode for mobile app".into(),
            description: "We've received feedback from 30+ users requesting a dark mode \
                option for the mobile app. This would greatly improve usability during \
                nighttime usage. Is this feature on your roadmap? Current app version: \
                2.4.1, both iOS and Android."
                .into(),
            customer_email: Some("product@techstartup.io".into()),
        },
        Ticket {
            id: "TICKET-004".into(),
            subject: "Charged twice this month - billing error".into(),
            description: "I noticed I was charged twice for my Pro subscription this \
                month: $49.99 on Jan 5th and again on Jan 15th. My subscription should \
                only charge once per month. Can you please investigate and refund the \
                duplicate charge? Account ID: acc_7892341."
                .into(),
            customer_email: Some("finance@enterprise.com".into()),
        },
        Ticket {
            id: "TICKET-005".into(),
            subject: "Slack integration not syncing messages".into(),
            description: "Our Slack integration stopped syncing messages to the dashboard \
                since yesterday. Connected via OAuth 2 weeks ago and it worked until Jan \
                19th. The integration status shows \"Connected\" but no new messages \
                appear. Not critical but important to fix soon."
                .into(),
            customer_email: Some("support-lead@techcorp.com".into()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn five_examples_with_unique_ids() {
        let tickets = example_tickets();
        assert_eq!(tickets.len(), 5);

        let ids: HashSet<_> = tickets.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn examples_are_classifiable() {
        for ticket in example_tickets() {
            assert!(!ticket.is_empty(), "ticket {} has no content", ticket.id);
            assert!(ticket.customer_email.is_some());
        }
    }
}
