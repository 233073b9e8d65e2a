mod events;
mod institutions;
mod kys;
mod merchants;
mod paged;
mod staff;
mod students;
mod subjects;

pub use events::{EventListing, TransactionListing};
pub use institutions::InstitutionListing;
pub use kys::KysView;
pub use merchants::{CategoryListing, MerchantListing, StoreListing};
pub use paged::{Listing, PagedView, RowAction};
pub use staff::StaffListing;
pub use students::{CareerListing, ContactListing, LeadListing, StudentListing};
pub use subjects::{SubjectListing, TopicListing};

use crate::hooks::Hooks;
use crate::ui::view::View;

/// Root view for a palette command, `None` for commands that are not views.
pub fn root_view(command: &str, hooks: &Hooks, page_size: u32) -> Option<Box<dyn View>> {
  let hooks = hooks.clone();
  let view: Box<dyn View> = match command {
    "merchants" => Box::new(PagedView::new(MerchantListing::new(page_size), hooks, page_size)),
    "categories" => Box::new(PagedView::new(CategoryListing, hooks, page_size)),
    "staff" => Box::new(PagedView::new(StaffListing::all(), hooks, page_size)),
    "institutions" => Box::new(PagedView::new(InstitutionListing, hooks, page_size)),
    "students" => Box::new(PagedView::new(StudentListing, hooks, page_size)),
    "leads" => Box::new(PagedView::new(LeadListing, hooks, page_size)),
    "careers" => Box::new(PagedView::new(CareerListing, hooks, page_size)),
    "contactus" => Box::new(PagedView::new(ContactListing, hooks, page_size)),
    "events" => Box::new(PagedView::new(EventListing::new(page_size), hooks, page_size)),
    "subjects" => Box::new(PagedView::new(SubjectListing::new(page_size), hooks, page_size)),
    _ => return None,
  };
  Some(view)
}
